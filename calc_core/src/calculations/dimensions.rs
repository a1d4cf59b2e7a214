//! # Element Dimensions
//!
//! Three measured dimensions, each in its own unit, normalized to meters
//! before the volume is taken. Which physical dimension each slot means
//! depends on the element kind (see [`ElementKind::dimension_names`]).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::dimensions::{Dimension, Dimensions};
//! use calc_core::units::LengthUnit;
//!
//! let dims = Dimensions::new(
//!     Dimension::new(4.0, LengthUnit::Meter),
//!     Dimension::new(300.0, LengthUnit::Centimeter),
//!     Dimension::new(0.1, LengthUnit::Meter),
//! );
//! assert!((dims.volume_m3() - 1.2).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::ElementKind;
use crate::units::{to_meters, LengthUnit};

/// A single measured length with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Dimension {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Dimension { value, unit }
    }

    /// Length in meters
    pub fn meters(&self) -> f64 {
        to_meters(self.value, self.unit)
    }
}

/// The three dimensions of an element, in form order.
///
/// ## JSON Example
///
/// ```json
/// [
///   { "value": 4.0, "unit": "m" },
///   { "value": 3.0, "unit": "m" },
///   { "value": 10.0, "unit": "cm" }
/// ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimensions(pub [Dimension; 3]);

impl Dimensions {
    pub fn new(first: Dimension, second: Dimension, third: Dimension) -> Self {
        Dimensions([first, second, third])
    }

    /// Units in form order, used for display-family detection
    pub fn units(&self) -> [LengthUnit; 3] {
        self.0.map(|d| d.unit)
    }

    /// Each dimension in meters
    pub fn meters(&self) -> [f64; 3] {
        self.0.map(|d| d.meters())
    }

    /// Product of the three normalized dimensions (m³)
    pub fn volume_m3(&self) -> f64 {
        self.meters().iter().product()
    }

    /// Reject any dimension that is not strictly positive, and any volume
    /// that is not a positive finite number.
    ///
    /// Returns the volume on success.
    pub fn validated_volume_m3(&self, element: ElementKind) -> CalcResult<f64> {
        let volume = self.volume_m3();
        let names = element.dimension_names();
        for (dim, name) in self.0.iter().zip(names) {
            if !(dim.meters() > 0.0) {
                tracing::debug!(
                    element = element.code(),
                    dimension = name,
                    value = dim.value,
                    "rejecting non-positive dimension"
                );
                return Err(CalcError::invalid_volume(volume));
            }
        }
        if !volume.is_finite() || volume <= 0.0 {
            return Err(CalcError::invalid_volume(volume));
        }
        Ok(volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(values: [f64; 3], unit: LengthUnit) -> Dimensions {
        Dimensions(values.map(|v| Dimension::new(v, unit)))
    }

    #[test]
    fn test_mixed_unit_volume() {
        let d = Dimensions::new(
            Dimension::new(10.0, LengthUnit::Foot),
            Dimension::new(120.0, LengthUnit::Inch),
            Dimension::new(10.0, LengthUnit::Centimeter),
        );
        // 3.048 m * 3.048 m * 0.1 m
        assert!((d.volume_m3() - 0.9290304).abs() < 1e-9);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let d = dims([4.0, 0.0, 0.1], LengthUnit::Meter);
        let err = d.validated_volume_m3(ElementKind::Slab).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VOLUME");
    }

    #[test]
    fn test_negative_pair_rejected() {
        // Two negatives give a positive product but are still invalid
        let d = dims([-4.0, -3.0, 0.1], LengthUnit::Meter);
        assert!(d.volume_m3() > 0.0);
        assert!(d.validated_volume_m3(ElementKind::Beam).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        let d = dims([f64::NAN, 1.0, 1.0], LengthUnit::Meter);
        assert!(d.validated_volume_m3(ElementKind::Column).is_err());
    }

    #[test]
    fn test_valid_volume() {
        let d = dims([1.0, 2.0, 0.5], LengthUnit::Meter);
        assert_eq!(d.validated_volume_m3(ElementKind::Footing).unwrap(), 1.0);
        assert_eq!(d.units(), [LengthUnit::Meter; 3]);
    }
}
