//! # Calculator Session
//!
//! Ties the form, the pipeline, and the history together the way a UI
//! drives them: calculate on demand, remember the last successful result
//! for display, save a snapshot under a project name.
//!
//! A failed calculation or save leaves the previous state untouched.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::history::History;
//! use calc_core::input::DimensionField;
//! use calc_core::session::Session;
//! use calc_core::store::MemoryStore;
//!
//! let mut session = Session::default();
//! session.form.slab.dimensions = [
//!     DimensionField::new("4", "m"),
//!     DimensionField::new("3", "m"),
//!     DimensionField::new("0.1", "m"),
//! ];
//!
//! let summary = session.calculate()?;
//! assert_eq!(summary.water_qty, "96 L");
//! assert!(session.results_visible());
//!
//! let history = History::new(MemoryStore::new());
//! session.form.project_name = "Back porch".to_string();
//! session.save(&history)?;
//! assert_eq!(history.load()[0].water, "96 L");
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use crate::calculations::{calculate, CalculationResult};
use crate::display::DisplaySummary;
use crate::errors::CalcResult;
use crate::history::History;
use crate::input::FormState;
use crate::record::{CalculationRecord, RecordBuilder};
use crate::settings::Settings;
use crate::store::KeyValueStore;

/// Last successful calculation and its rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: CalculationResult,
    pub summary: DisplaySummary,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub form: FormState,
    last: Option<Outcome>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Session {
            form: FormState::with_settings(settings),
            last: None,
        }
    }

    /// Run the pipeline on the active tab and keep the result for display.
    pub fn calculate(&mut self) -> CalcResult<&DisplaySummary> {
        let result = calculate(&self.form.to_input())?;
        let summary = DisplaySummary::from_result(&result);
        let outcome = self.last.insert(Outcome { result, summary });
        Ok(&outcome.summary)
    }

    /// Whether a result panel should be shown
    pub fn results_visible(&self) -> bool {
        self.last.is_some()
    }

    pub fn last(&self) -> Option<&Outcome> {
        self.last.as_ref()
    }

    /// Snapshot the form and displayed results into `history`, then clear
    /// the project name field.
    pub fn save<S: KeyValueStore>(&mut self, history: &History<S>) -> CalcResult<CalculationRecord> {
        let mut builder = RecordBuilder::new(&self.form);
        if let Some(outcome) = &self.last {
            builder = builder.with_summary(&outcome.summary);
        }
        let record = history.add(builder.build()?)?;
        self.form.project_name.clear();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::input::DimensionField;
    use crate::store::MemoryStore;

    fn slab_session() -> Session {
        let mut session = Session::default();
        session.form.slab.dimensions = [
            DimensionField::new("4", "m"),
            DimensionField::new("3", "m"),
            DimensionField::new("0.1", "m"),
        ];
        session
    }

    #[test]
    fn test_hidden_until_calculated() {
        assert!(!Session::default().results_visible());
    }

    #[test]
    fn test_failed_calculation_keeps_previous_result() {
        let mut session = slab_session();
        let first = session.calculate().unwrap().clone();

        session.form.slab.dimensions[0].value = "".into();
        let err = session.calculate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VOLUME");

        assert!(session.results_visible());
        assert_eq!(session.last().unwrap().summary, first);
    }

    #[test]
    fn test_save_requires_name() {
        let mut session = slab_session();
        session.calculate().unwrap();
        let history = History::new(MemoryStore::new());

        session.form.project_name = "  ".into();
        assert_eq!(session.save(&history).unwrap_err(), CalcError::MissingProjectName);
        assert!(history.load().is_empty());
        assert_eq!(session.form.project_name, "  ");
    }

    #[test]
    fn test_save_clears_name() {
        let mut session = slab_session();
        session.calculate().unwrap();
        let history = History::new(MemoryStore::new());

        session.form.project_name = "Slab A".into();
        let record = session.save(&history).unwrap();
        assert_eq!(record.name, "Slab A");
        assert_eq!(record.cement, "9 bags (339 kg)");
        assert!(session.form.project_name.is_empty());
    }

    #[test]
    fn test_imperial_display() {
        let mut session = Session::default();
        session.form.slab.dimensions = [
            DimensionField::new("10", "ft"),
            DimensionField::new("10", "ft"),
            DimensionField::new("4", "in"),
        ];
        let summary = session.calculate().unwrap();
        assert!(summary.water_qty.contains("gallons"));
        assert!(summary.sand_qty.ends_with("cu ft"));
        assert!(summary.cement_qty.ends_with("lb)"));
    }
}
