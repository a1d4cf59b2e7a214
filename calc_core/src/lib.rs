//! # calc_core - Concrete Materials Estimation Engine
//!
//! `calc_core` turns the dimensions of a slab, beam, column, or footing into
//! the cement, sand, gravel, and water needed to pour it, and what those
//! materials cost. All inputs and outputs are JSON-serializable so the
//! engine can sit behind any front end: a GUI, a CLI, a web page, a script.
//!
//! ## Design Philosophy
//!
//! - **Stateless core**: the estimation pipeline is pure functions
//! - **Parse at the edge**: raw form text becomes typed input with
//!   documented defaults before any computation runs
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Storage is injected**: history persistence goes through a
//!   [`store::KeyValueStore`], never a global
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{calculate, DisplaySummary, FormState};
//! use calc_core::input::DimensionField;
//!
//! let mut form = FormState::default();
//! form.slab.dimensions = [
//!     DimensionField::new("4", "m"),
//!     DimensionField::new("3", "m"),
//!     DimensionField::new("10", "cm"),
//! ];
//! form.prices.cement = "250".to_string();
//!
//! let result = calculate(&form.to_input()).unwrap();
//! let summary = DisplaySummary::from_result(&result);
//! assert_eq!(summary.cement_qty, "9 bags (339 kg)");
//! assert_eq!(summary.cement_cost, "₱2250.00");
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - volume, material estimate, water adjustment, cost
//! - [`materials`] - element kinds, PSI classes, mix ratios, constants
//! - [`display`] - metric/imperial selection and result strings
//! - [`input`] - raw form state and boundary parsing
//! - [`record`] - saved-calculation snapshots
//! - [`history`] - the saved-calculation list over a key-value store
//! - [`store`] - key-value storage backends
//! - [`session`] - form + last result + save, as a UI drives it
//! - [`settings`] - configurable defaults
//! - [`units`] - length units and quantity wrappers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod display;
pub mod errors;
pub mod history;
pub mod input;
pub mod materials;
pub mod record;
pub mod session;
pub mod settings;
pub mod store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, CalculationInput, CalculationResult};
pub use display::{detect_family, DisplaySummary, UnitFamily};
pub use errors::{CalcError, CalcResult};
pub use history::History;
pub use input::FormState;
pub use record::{CalculationRecord, RecordBuilder};
pub use session::Session;
pub use settings::Settings;
