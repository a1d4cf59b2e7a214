//! # Estimation Pipeline
//!
//! Each step is a pure function in its own module:
//!
//! - [`dimensions`] - unit normalization and volume
//! - [`estimate`] - cement/sand/gravel/water quantities from the mix ratio
//! - [`water`] - humidity and temperature adjustment of mixing water
//! - [`cost`] - prices and totals
//!
//! [`calculate`] chains them: validate volume, estimate, adjust water,
//! price. Formatting for display lives in [`crate::display`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{calculate, CalculationInput};
//! use calc_core::calculations::dimensions::{Dimension, Dimensions};
//! use calc_core::materials::{ElementKind, PsiClass};
//! use calc_core::units::LengthUnit;
//!
//! let input = CalculationInput {
//!     element: ElementKind::Slab,
//!     dimensions: Dimensions::new(
//!         Dimension::new(4.0, LengthUnit::Meter),
//!         Dimension::new(3.0, LengthUnit::Meter),
//!         Dimension::new(0.1, LengthUnit::Meter),
//!     ),
//!     psi: PsiClass::Psi3000,
//!     environment: Default::default(),
//!     prices: Default::default(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.adjusted_water_liters, 96);
//! ```

pub mod cost;
pub mod dimensions;
pub mod estimate;
pub mod water;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::materials::{ElementKind, PsiClass};
use crate::units::LengthUnit;

// Re-export commonly used types
pub use cost::{cost, CostBreakdown, Currency, PriceSheet};
pub use dimensions::{Dimension, Dimensions};
pub use estimate::{estimate, MaterialEstimate};
pub use water::{adjust_water, water_adjustment_fraction, EnvironmentalConditions};

/// Everything one calculation needs.
///
/// ## JSON Example
///
/// ```json
/// {
///   "element": "slab",
///   "dimensions": [
///     { "value": 4.0, "unit": "m" },
///     { "value": 3.0, "unit": "m" },
///     { "value": 10.0, "unit": "cm" }
///   ],
///   "psi": 3000,
///   "environment": { "humidity": 50.0, "temperature": 25.0 },
///   "prices": {
///     "cement_per_bag": 250.0,
///     "sand_per_bag": 40.0,
///     "gravel_per_bag": 55.0,
///     "water_per_liter": 0.5,
///     "currency": "PHP"
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub element: ElementKind,
    pub dimensions: Dimensions,
    pub psi: PsiClass,
    #[serde(default)]
    pub environment: EnvironmentalConditions,
    #[serde(default)]
    pub prices: PriceSheet,
}

/// Output of [`calculate`]. All quantities metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub element: ElementKind,
    pub psi: PsiClass,
    /// Units the dimensions were entered in, for display-family detection
    pub units: [LengthUnit; 3],
    pub estimate: MaterialEstimate,
    pub environment: EnvironmentalConditions,
    /// Clamped water adjustment fraction applied to the base water
    pub water_adjustment: f64,
    pub adjusted_water_liters: u32,
    pub costs: CostBreakdown,
}

impl CalculationResult {
    pub fn volume_m3(&self) -> f64 {
        self.estimate.volume_m3
    }
}

/// Run the full estimation pipeline.
///
/// # Errors
///
/// * `CalcError::InvalidVolume` - a dimension is zero, negative, or not a
///   number, so no estimate is produced.
pub fn calculate(input: &CalculationInput) -> CalcResult<CalculationResult> {
    let volume_m3 = input.dimensions.validated_volume_m3(input.element)?;

    let est = estimate(volume_m3, input.element, input.psi);
    if !input.psi.is_listed() {
        tracing::warn!(
            psi = input.psi.psi(),
            element = input.element.code(),
            "no tabulated mix for this strength class, using default ratio"
        );
    }

    let env = input.environment;
    let water_adjustment = water_adjustment_fraction(env.humidity, env.temperature);
    let adjusted_water_liters = adjust_water(est.water.base_liters as f64, env.humidity, env.temperature);

    let costs = cost(&est, adjusted_water_liters, &input.prices);

    tracing::debug!(
        element = input.element.code(),
        psi = input.psi.psi(),
        volume_m3,
        cement_bags = est.cement.bags,
        water_liters = adjusted_water_liters,
        total_cost = costs.total,
        "calculation complete"
    );

    Ok(CalculationResult {
        element: input.element,
        psi: input.psi,
        units: input.dimensions.units(),
        estimate: est,
        environment: env,
        water_adjustment,
        adjusted_water_liters,
        costs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(element: ElementKind, values: [f64; 3], unit: LengthUnit) -> CalculationInput {
        CalculationInput {
            element,
            dimensions: Dimensions(values.map(|v| Dimension::new(v, unit))),
            psi: PsiClass::Psi3000,
            environment: EnvironmentalConditions::default(),
            prices: PriceSheet::default(),
        }
    }

    #[test]
    fn test_reference_slab() {
        let result = calculate(&input(ElementKind::Slab, [4.0, 3.0, 0.1], LengthUnit::Meter)).unwrap();
        assert!((result.volume_m3() - 1.2).abs() < 1e-9);
        assert_eq!(result.estimate.mix_ratio.parts_sum(), 8.5);
        assert_eq!(result.water_adjustment, 0.0);
        assert_eq!(result.adjusted_water_liters, 96);
    }

    #[test]
    fn test_zero_volume_blocks() {
        let err = calculate(&input(ElementKind::Beam, [4.0, 0.0, 0.3], LengthUnit::Meter)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VOLUME");
    }

    #[test]
    fn test_environment_flows_into_cost() {
        let mut inp = input(ElementKind::Footing, [1.0, 1.0, 1.0], LengthUnit::Meter);
        inp.environment = EnvironmentalConditions::new(20.0, 40.0);
        inp.prices.water_per_liter = 2.0;
        let result = calculate(&inp).unwrap();
        // 80 L base, +12.5 % => 90 L
        assert_eq!(result.adjusted_water_liters, 90);
        assert_eq!(result.costs.water, 180.0);
        assert_eq!(result.costs.total, 180.0);
    }

    #[test]
    fn test_input_json_roundtrip() {
        let inp = input(ElementKind::Column, [3.0, 0.3, 0.3], LengthUnit::Meter);
        let json = serde_json::to_string(&inp).unwrap();
        assert!(json.contains("\"element\":\"column\""));
        assert!(json.contains("\"psi\":3000"));
        let back: CalculationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inp);
    }
}
