//! # Form Input
//!
//! The raw, text-valued state of the calculator form and the parsing step
//! that turns it into a typed [`CalculationInput`].
//!
//! Parsing never fails. Each field has a documented default:
//!
//! | Field                     | Blank / invalid becomes          |
//! |---------------------------|----------------------------------|
//! | dimension value           | 0 (then rejected as zero volume) |
//! | dimension unit            | meters (identity conversion)     |
//! | PSI                       | unlisted (default 1 : 2 : 4 mix) |
//! | price                     | 0                                |
//! | currency                  | EUR symbol                       |
//! | humidity (or 0)           | 50 %                             |
//! | temperature (or 0)        | 25 °C                            |
//!
//! The form keeps values for all four element tabs at once; only the active
//! tab feeds the calculation, but saved records snapshot every tab.

use serde::{Deserialize, Serialize};

use crate::calculations::{
    CalculationInput, Currency, Dimension, Dimensions, EnvironmentalConditions, PriceSheet,
};
use crate::calculations::water::{NEUTRAL_HUMIDITY_PCT, NEUTRAL_TEMPERATURE_C};
use crate::materials::{ElementKind, PsiClass};
use crate::settings::Settings;
use crate::units::LengthUnit;

/// Parse a numeric form field. Blank, malformed, or non-finite text is 0.
pub fn parse_number(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a numeric form field, substituting `default` for anything that
/// parses to 0.
pub fn parse_number_or(text: &str, default: f64) -> f64 {
    let value = parse_number(text);
    if value == 0.0 {
        default
    } else {
        value
    }
}

/// Resolve a unit code, treating unknown codes as meters.
pub fn parse_unit(code: &str) -> LengthUnit {
    LengthUnit::from_code(code).unwrap_or_else(|| {
        if !code.trim().is_empty() {
            tracing::warn!(code, "unrecognized length unit, using value unconverted");
        }
        LengthUnit::Meter
    })
}

/// One dimension field and its unit select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionField {
    pub value: String,
    pub unit: String,
}

impl DimensionField {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        DimensionField {
            value: value.into(),
            unit: unit.into(),
        }
    }

    pub fn parse(&self) -> Dimension {
        Dimension::new(parse_number(&self.value), parse_unit(&self.unit))
    }
}

impl Default for DimensionField {
    fn default() -> Self {
        DimensionField::new("", LengthUnit::Meter.code())
    }
}

/// Inputs on one element tab, dimensions in [`ElementKind::dimension_names`]
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementForm {
    pub dimensions: [DimensionField; 3],
    pub psi: String,
}

impl ElementForm {
    pub fn new(dimensions: [DimensionField; 3], psi: impl Into<String>) -> Self {
        ElementForm {
            dimensions,
            psi: psi.into(),
        }
    }

    pub fn parse_dimensions(&self) -> Dimensions {
        let [a, b, c] = &self.dimensions;
        Dimensions::new(a.parse(), b.parse(), c.parse())
    }

    pub fn parse_psi(&self) -> PsiClass {
        PsiClass::from_text(&self.psi)
    }
}

impl Default for ElementForm {
    fn default() -> Self {
        ElementForm::new(Default::default(), PsiClass::default().psi().to_string())
    }
}

/// Price inputs and currency select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceForm {
    pub cement: String,
    pub sand: String,
    pub gravel: String,
    pub water: String,
    pub currency: String,
}

impl PriceForm {
    pub fn parse(&self) -> PriceSheet {
        PriceSheet {
            cement_per_bag: parse_number(&self.cement),
            sand_per_bag: parse_number(&self.sand),
            gravel_per_bag: parse_number(&self.gravel),
            water_per_liter: parse_number(&self.water),
            currency: Currency::from_code(&self.currency),
        }
    }
}

impl Default for PriceForm {
    fn default() -> Self {
        PriceForm {
            cement: String::new(),
            sand: String::new(),
            gravel: String::new(),
            water: String::new(),
            currency: Currency::default().code().to_string(),
        }
    }
}

/// The whole calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    /// Active element tab
    pub active: ElementKind,
    pub slab: ElementForm,
    pub beam: ElementForm,
    pub column: ElementForm,
    pub footing: ElementForm,
    pub prices: PriceForm,
    pub humidity: String,
    pub temperature: String,
    pub project_name: String,
}

impl Default for FormState {
    fn default() -> Self {
        FormState::with_settings(&Settings::default())
    }
}

impl FormState {
    /// Blank form with the configured default selections.
    pub fn with_settings(settings: &Settings) -> Self {
        let element = ElementForm::new(Default::default(), settings.default_psi.to_string());
        FormState {
            active: ElementKind::default(),
            slab: element.clone(),
            beam: element.clone(),
            column: element.clone(),
            footing: element,
            prices: PriceForm {
                currency: settings.default_currency.code().to_string(),
                ..PriceForm::default()
            },
            humidity: settings.default_humidity.to_string(),
            temperature: settings.default_temperature.to_string(),
            project_name: String::new(),
        }
    }

    pub fn element(&self, kind: ElementKind) -> &ElementForm {
        match kind {
            ElementKind::Slab => &self.slab,
            ElementKind::Beam => &self.beam,
            ElementKind::Column => &self.column,
            ElementKind::Footing => &self.footing,
        }
    }

    pub fn element_mut(&mut self, kind: ElementKind) -> &mut ElementForm {
        match kind {
            ElementKind::Slab => &mut self.slab,
            ElementKind::Beam => &mut self.beam,
            ElementKind::Column => &mut self.column,
            ElementKind::Footing => &mut self.footing,
        }
    }

    /// Select the active tab by code; unknown codes select the slab tab.
    pub fn set_active_code(&mut self, code: &str) {
        self.active = ElementKind::from_code(code).unwrap_or_default();
    }

    pub fn environment(&self) -> EnvironmentalConditions {
        EnvironmentalConditions::new(
            parse_number_or(&self.humidity, NEUTRAL_HUMIDITY_PCT),
            parse_number_or(&self.temperature, NEUTRAL_TEMPERATURE_C),
        )
    }

    /// Typed input for the active tab.
    pub fn to_input(&self) -> CalculationInput {
        let element = self.element(self.active);
        CalculationInput {
            element: self.active,
            dimensions: element.parse_dimensions(),
            psi: element.parse_psi(),
            environment: self.environment(),
            prices: self.prices.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("4"), 4.0);
        assert_eq!(parse_number(" 2.5 "), 2.5);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
        assert_eq!(parse_number("-3"), -3.0);
    }

    #[test]
    fn test_parse_number_or() {
        assert_eq!(parse_number_or("", 50.0), 50.0);
        assert_eq!(parse_number_or("0", 25.0), 25.0);
        assert_eq!(parse_number_or("70", 50.0), 70.0);
    }

    #[test]
    fn test_unknown_unit_is_identity() {
        let d = DimensionField::new("3", "yards").parse();
        assert_eq!(d.meters(), 3.0);
        assert!(!d.unit.is_imperial());
    }

    #[test]
    fn test_default_form() {
        let form = FormState::default();
        assert_eq!(form.active, ElementKind::Slab);
        assert_eq!(form.beam.psi, "3000");
        assert_eq!(form.prices.currency, "PHP");
        assert_eq!(form.environment(), EnvironmentalConditions::new(50.0, 25.0));
    }

    #[test]
    fn test_to_input_uses_active_tab() {
        let mut form = FormState::default();
        form.slab.dimensions[0].value = "99".into();
        form.set_active_code("column");
        *form.element_mut(ElementKind::Column) = ElementForm::new(
            [
                DimensionField::new("10", "ft"),
                DimensionField::new("12", "in"),
                DimensionField::new("12", "in"),
            ],
            "4000",
        );
        form.prices.cement = "260".into();
        form.prices.currency = "USD".into();

        let input = form.to_input();
        assert_eq!(input.element, ElementKind::Column);
        assert_eq!(input.psi, PsiClass::Psi4000);
        assert_eq!(input.dimensions.0[0].value, 10.0);
        assert_eq!(input.prices.cement_per_bag, 260.0);
        assert_eq!(input.prices.sand_per_bag, 0.0);
        assert_eq!(input.prices.currency, Currency::Usd);
    }

    #[test]
    fn test_unknown_tab_selects_slab() {
        let mut form = FormState::default();
        form.set_active_code("retaining-wall");
        assert_eq!(form.active, ElementKind::Slab);
    }
}
