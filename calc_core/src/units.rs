//! # Unit Types
//!
//! Length units accepted from the input form, plus lightweight newtype
//! wrappers for the quantities the estimator produces. Internally every
//! quantity is metric (m, kg, m³, L); imperial wrappers exist only for
//! presentation.
//!
//! ## Conversion Factors
//!
//! | From         | To        | Factor     |
//! |--------------|-----------|------------|
//! | centimeter   | meter     | 0.01       |
//! | foot         | meter     | 0.3048     |
//! | inch         | meter     | 0.0254     |
//! | kilogram     | pound     | 2.20462    |
//! | cubic meter  | cubic ft  | 35.3147    |
//! | gallon (US)  | liter     | 3.78541    |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{to_meters, CubicFeet, CubicMeters, LengthUnit};
//!
//! assert_eq!(to_meters(250.0, LengthUnit::Centimeter), 2.5);
//!
//! let cu_ft: CubicFeet = CubicMeters(1.0).into();
//! assert_eq!(cu_ft.0, 35.3147);
//! ```

use serde::{Deserialize, Serialize};

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462;

/// Cubic feet per cubic meter
pub const CU_FT_PER_M3: f64 = 35.3147;

/// Liters per US gallon
pub const L_PER_GAL: f64 = 3.78541;

// ============================================================================
// Input Length Units
// ============================================================================

/// Length unit selectable for each dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "ft")]
    Foot,
    #[serde(rename = "in")]
    Inch,
}

impl LengthUnit {
    /// All length units for UI selection
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Meter,
        LengthUnit::Centimeter,
        LengthUnit::Foot,
        LengthUnit::Inch,
    ];

    /// Multiplicative factor to meters
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Centimeter => 0.01,
            LengthUnit::Foot => 0.3048,
            LengthUnit::Inch => 0.0254,
        }
    }

    /// Short code used by the input form ("m", "cm", "ft", "in")
    pub fn code(&self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Foot => "ft",
            LengthUnit::Inch => "in",
        }
    }

    /// Parse a form code. Returns `None` for anything unrecognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Some(LengthUnit::Meter),
            "cm" | "centimeter" | "centimeters" => Some(LengthUnit::Centimeter),
            "ft" | "foot" | "feet" => Some(LengthUnit::Foot),
            "in" | "inch" | "inches" => Some(LengthUnit::Inch),
            _ => None,
        }
    }

    /// True for foot and inch
    pub fn is_imperial(&self) -> bool {
        matches!(self, LengthUnit::Foot | LengthUnit::Inch)
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Convert a length in `unit` to meters.
///
/// Total and pure: callers are expected to have already turned blank or
/// malformed text into a number (see [`crate::input::parse_number`]).
pub fn to_meters(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        // Exact division keeps `to_meters(v, Centimeter) == v / 100`
        LengthUnit::Centimeter => value / 100.0,
        other => value * other.meters_per_unit(),
    }
}

// ============================================================================
// Quantity Wrappers
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Pounds(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CubicMeters(pub f64);

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CubicFeet(pub f64);

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Liters(pub f64);

/// Volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Gallons(pub f64);

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LB_PER_KG)
    }
}

impl From<CubicMeters> for CubicFeet {
    fn from(m3: CubicMeters) -> Self {
        CubicFeet(m3.0 * CU_FT_PER_M3)
    }
}

impl From<Liters> for Gallons {
    fn from(l: Liters) -> Self {
        Gallons(l.0 / L_PER_GAL)
    }
}
