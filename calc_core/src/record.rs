//! # Saved Calculation Records
//!
//! A [`CalculationRecord`] is an immutable snapshot of the form and the
//! displayed results at the moment the user pressed save. Field names on
//! the wire are fixed so previously saved histories keep loading.
//!
//! ## Structure
//!
//! ```text
//! CalculationRecord
//! ├── id, name, date, type
//! ├── inputs: every element tab's raw dimensions, units, and PSI
//! ├── cement, sand, gravel, water, total: displayed result strings
//! ├── prices: parsed unit prices + currency code
//! └── env: parsed humidity and temperature
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::input::FormState;
//! use calc_core::record::RecordBuilder;
//!
//! let mut form = FormState::default();
//! form.project_name = "  Garage slab ".to_string();
//!
//! let record = RecordBuilder::new(&form).build().unwrap();
//! assert_eq!(record.name, "Garage slab");
//! assert_eq!(record.kind, "Slab");
//! ```

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::Currency;
use crate::display::DisplaySummary;
use crate::errors::{CalcError, CalcResult};
use crate::input::{parse_number, ElementForm, FormState};

/// Format of the human-readable `date` field
pub const DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Raw inputs of a slab or footing tab.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LengthWidthThickness {
    pub length: String,
    pub length_unit: String,
    pub width: String,
    pub width_unit: String,
    pub thickness: String,
    pub thickness_unit: String,
    pub psi: String,
}

/// Raw inputs of the beam tab.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LengthWidthHeight {
    pub length: String,
    pub length_unit: String,
    pub width: String,
    pub width_unit: String,
    pub height: String,
    pub height_unit: String,
    pub psi: String,
}

/// Raw inputs of the column tab.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeightWidthDepth {
    pub height: String,
    pub height_unit: String,
    pub width: String,
    pub width_unit: String,
    pub depth: String,
    pub depth_unit: String,
    pub psi: String,
}

impl From<&ElementForm> for LengthWidthThickness {
    fn from(form: &ElementForm) -> Self {
        let [l, w, t] = &form.dimensions;
        LengthWidthThickness {
            length: l.value.clone(),
            length_unit: l.unit.clone(),
            width: w.value.clone(),
            width_unit: w.unit.clone(),
            thickness: t.value.clone(),
            thickness_unit: t.unit.clone(),
            psi: form.psi.clone(),
        }
    }
}

impl From<&ElementForm> for LengthWidthHeight {
    fn from(form: &ElementForm) -> Self {
        let [l, w, h] = &form.dimensions;
        LengthWidthHeight {
            length: l.value.clone(),
            length_unit: l.unit.clone(),
            width: w.value.clone(),
            width_unit: w.unit.clone(),
            height: h.value.clone(),
            height_unit: h.unit.clone(),
            psi: form.psi.clone(),
        }
    }
}

impl From<&ElementForm> for HeightWidthDepth {
    fn from(form: &ElementForm) -> Self {
        let [h, w, d] = &form.dimensions;
        HeightWidthDepth {
            height: h.value.clone(),
            height_unit: h.unit.clone(),
            width: w.value.clone(),
            width_unit: w.unit.clone(),
            depth: d.value.clone(),
            depth_unit: d.unit.clone(),
            psi: form.psi.clone(),
        }
    }
}

/// Raw inputs of all four tabs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordInputs {
    pub slab: LengthWidthThickness,
    pub beam: LengthWidthHeight,
    pub column: HeightWidthDepth,
    pub footing: LengthWidthThickness,
}

impl From<&FormState> for RecordInputs {
    fn from(form: &FormState) -> Self {
        RecordInputs {
            slab: (&form.slab).into(),
            beam: (&form.beam).into(),
            column: (&form.column).into(),
            footing: (&form.footing).into(),
        }
    }
}

/// Prices as parsed at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPrices {
    pub cement_price: f64,
    pub sand_price: f64,
    pub gravel_price: f64,
    pub water_price: f64,
    /// Currency code as selected (not normalized); blank is stored as "PHP"
    pub currency: String,
}

impl Default for RecordPrices {
    fn default() -> Self {
        RecordPrices {
            cement_price: 0.0,
            sand_price: 0.0,
            gravel_price: 0.0,
            water_price: 0.0,
            currency: Currency::default().code().to_string(),
        }
    }
}

/// Environment as parsed at save time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordEnvironment {
    pub humidity: f64,
    pub temperature: f64,
}

impl Default for RecordEnvironment {
    fn default() -> Self {
        RecordEnvironment {
            humidity: 50.0,
            temperature: 25.0,
        }
    }
}

/// One saved calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": 1760601600000,
///   "name": "Garage slab",
///   "date": "10/16/2025, 9:20:00 AM",
///   "type": "Slab",
///   "inputs": { "slab": { "length": "4", "lengthUnit": "m", "...": "..." } },
///   "cement": "9 bags (339 kg)",
///   "sand": "22 bags (847 kg) - 0.529 m³",
///   "gravel": "43 bags (1694 kg) - 1.129 m³",
///   "water": "96 L",
///   "total": "₱5543.00",
///   "prices": { "cementPrice": 250, "sandPrice": 40, "gravelPrice": 55, "waterPrice": 0.5, "currency": "PHP" },
///   "env": { "humidity": 50, "temperature": 25 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Creation time in milliseconds since the Unix epoch
    pub id: i64,
    pub name: String,
    /// Local creation time for display
    #[serde(default)]
    pub date: String,
    /// Element tab label ("Slab", "Beam", ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub inputs: RecordInputs,
    #[serde(default)]
    pub cement: String,
    #[serde(default)]
    pub sand: String,
    #[serde(default)]
    pub gravel: String,
    #[serde(default)]
    pub water: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub prices: RecordPrices,
    #[serde(default)]
    pub env: RecordEnvironment,
}

impl CalculationRecord {
    /// Creation instant decoded from the id
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.id).single()
    }

    /// Copy of this record under a different id
    pub(crate) fn with_id(&self, id: i64) -> Self {
        CalculationRecord {
            id,
            ..self.clone()
        }
    }
}

/// Builds a [`CalculationRecord`] from the form and the last displayed
/// results.
///
/// Without a summary the result strings are left empty, matching a save
/// made before any successful calculation.
pub struct RecordBuilder<'a> {
    form: &'a FormState,
    summary: Option<&'a DisplaySummary>,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(form: &'a FormState) -> Self {
        RecordBuilder { form, summary: None }
    }

    pub fn with_summary(mut self, summary: &'a DisplaySummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Build with the current local time.
    pub fn build(&self) -> CalcResult<CalculationRecord> {
        self.build_at(Local::now())
    }

    /// Build with an explicit creation time.
    ///
    /// # Errors
    ///
    /// * `CalcError::MissingProjectName` - the trimmed project name is empty
    pub fn build_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> CalcResult<CalculationRecord>
    where
        Tz::Offset: std::fmt::Display,
    {
        let name = self.form.project_name.trim();
        if name.is_empty() {
            return Err(CalcError::MissingProjectName);
        }

        let form = self.form;
        let summary = self.summary.cloned().unwrap_or_default();
        let env = form.environment();

        Ok(CalculationRecord {
            id: now.timestamp_millis(),
            name: name.to_string(),
            date: now.format(DATE_FORMAT).to_string(),
            kind: form.active.display_name().to_string(),
            inputs: RecordInputs::from(form),
            cement: summary.cement_qty,
            sand: summary.sand_qty,
            gravel: summary.gravel_qty,
            water: summary.water_qty,
            total: summary.total_cost,
            prices: RecordPrices {
                cement_price: parse_number(&form.prices.cement),
                sand_price: parse_number(&form.prices.sand),
                gravel_price: parse_number(&form.prices.gravel),
                water_price: parse_number(&form.prices.water),
                currency: currency_code(&form.prices.currency),
            },
            env: RecordEnvironment {
                humidity: env.humidity,
                temperature: env.temperature,
            },
        })
    }
}

fn currency_code(selected: &str) -> String {
    let code = selected.trim();
    if code.is_empty() {
        Currency::default().code().to_string()
    } else {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DimensionField;
    use crate::materials::ElementKind;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap()
    }

    fn named_form(name: &str) -> FormState {
        let mut form = FormState::default();
        form.project_name = name.to_string();
        form
    }

    #[test]
    fn test_blank_name_rejected() {
        for name in ["", "   ", "\t\n"] {
            let err = RecordBuilder::new(&named_form(name)).build_at(fixed_time()).unwrap_err();
            assert_eq!(err, CalcError::MissingProjectName);
        }
    }

    #[test]
    fn test_identity_and_date() {
        let record = RecordBuilder::new(&named_form("House")).build_at(fixed_time()).unwrap();
        assert_eq!(record.id, fixed_time().timestamp_millis());
        assert_eq!(record.date, "3/7/2025, 2:05:09 PM");
        assert_eq!(record.created_at(), Some(fixed_time()));
    }

    #[test]
    fn test_snapshots_every_tab() {
        let mut form = named_form("Shed");
        form.active = ElementKind::Beam;
        form.column.dimensions = [
            DimensionField::new("3", "m"),
            DimensionField::new("30", "cm"),
            DimensionField::new("12", "in"),
        ];
        form.column.psi = "4000".into();
        form.footing.dimensions[2] = DimensionField::new("0.5", "ft");

        let record = RecordBuilder::new(&form).build_at(fixed_time()).unwrap();
        assert_eq!(record.kind, "Beam");
        assert_eq!(record.inputs.column.height, "3");
        assert_eq!(record.inputs.column.width_unit, "cm");
        assert_eq!(record.inputs.column.depth_unit, "in");
        assert_eq!(record.inputs.column.psi, "4000");
        assert_eq!(record.inputs.footing.thickness, "0.5");
        assert_eq!(record.inputs.footing.thickness_unit, "ft");
    }

    #[test]
    fn test_summary_strings_copied() {
        let summary = DisplaySummary {
            cement_qty: "9 bags (339 kg)".into(),
            water_qty: "96 L".into(),
            total_cost: "₱0.00".into(),
            ..DisplaySummary::default()
        };
        let record = RecordBuilder::new(&named_form("Patio"))
            .with_summary(&summary)
            .build_at(fixed_time())
            .unwrap();
        assert_eq!(record.cement, "9 bags (339 kg)");
        assert_eq!(record.water, "96 L");
        assert_eq!(record.total, "₱0.00");
        assert_eq!(record.sand, "");
    }

    #[test]
    fn test_wire_field_names() {
        let mut form = named_form("Path");
        form.prices.cement = "250".into();
        let record = RecordBuilder::new(&form).build_at(fixed_time()).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["type"], "Slab");
        assert_eq!(value["prices"]["cementPrice"], 250.0);
        assert_eq!(value["prices"]["currency"], "PHP");
        assert_eq!(value["env"]["humidity"], 50.0);
        assert!(value["inputs"]["slab"].get("thicknessUnit").is_some());
        assert!(value["inputs"]["beam"].get("heightUnit").is_some());
        assert!(value["inputs"]["column"].get("depthUnit").is_some());
    }

    #[test]
    fn test_blank_currency_stored_as_peso() {
        let mut form = named_form("Fence");
        form.prices.currency = "  ".into();
        let record = RecordBuilder::new(&form).build_at(fixed_time()).unwrap();
        assert_eq!(record.prices.currency, "PHP");

        form.prices.currency = "GBP".into();
        let record = RecordBuilder::new(&form).build_at(fixed_time()).unwrap();
        assert_eq!(record.prices.currency, "GBP");
    }
}
