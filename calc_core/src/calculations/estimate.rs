//! # Material Estimate
//!
//! Splits a concrete volume into cement, sand, gravel, and water quantities
//! using the mix ratio for the element kind and strength class.
//!
//! ## Method
//!
//! 1. Total mass = volume × 2400 kg/m³
//! 2. Each constituent's mass = its share of the mix-ratio parts × total mass
//! 3. Bags = ⌈mass / 40 kg⌉ for cement, sand, and gravel alike
//! 4. Sand and gravel loose volume = mass / bulk density, also in cubic feet
//!    (rounded up)
//! 5. Base water = ⌈volume × 80 L/m³⌉
//!
//! Quantities are carried in metric; conversion for display happens in
//! [`crate::display`].
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::estimate::estimate;
//! use calc_core::materials::{ElementKind, PsiClass};
//!
//! let est = estimate(1.2, ElementKind::Slab, PsiClass::Psi3000);
//! assert_eq!(est.cement.bags, 9);
//! assert_eq!(est.water.base_liters, 96);
//! ```

use serde::{Deserialize, Serialize};

use crate::materials::{
    mix_ratio, ElementKind, MixRatio, PsiClass, BAG_MASS_KG, CONCRETE_DENSITY_KG_M3,
    GRAVEL_BULK_DENSITY_KG_M3, SAND_BULK_DENSITY_KG_M3, WATER_L_PER_M3,
};
use crate::units::{CubicFeet, CubicMeters};

/// Values this close to a whole number round to it instead of up.
///
/// Keeps products like 4 m × 3 m × 0.1 m × 80 L/m³ at 96 L rather than 97 L
/// when binary floating point lands a hair above the integer.
const CEIL_TOLERANCE: f64 = 1e-9;

/// Round a purchasable quantity up to a whole count.
pub(crate) fn ceil_count(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let nearest = value.round();
    let whole = if (value - nearest).abs() < CEIL_TOLERANCE {
        nearest
    } else {
        value.ceil()
    };
    whole as u32
}

/// Cement quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CementQuantity {
    pub bags: u32,
    pub mass_kg: f64,
}

/// Sand or gravel quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateQuantity {
    pub bags: u32,
    pub mass_kg: f64,
    /// Loose volume at bulk density
    pub volume_m3: f64,
    /// Loose volume in cubic feet, rounded up
    pub volume_cu_ft: u32,
}

impl AggregateQuantity {
    fn from_mass(mass_kg: f64, bulk_density_kg_m3: f64) -> Self {
        let volume_m3 = mass_kg / bulk_density_kg_m3;
        let cu_ft: CubicFeet = CubicMeters(volume_m3).into();
        AggregateQuantity {
            bags: ceil_count(mass_kg / BAG_MASS_KG),
            mass_kg,
            volume_m3,
            volume_cu_ft: ceil_count(cu_ft.0),
        }
    }
}

/// Water quantity before environmental adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterQuantity {
    pub base_liters: u32,
}

/// Materials for one pour.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume_m3": 1.2,
///   "mix_ratio": { "cement": 1.0, "sand": 2.5, "gravel": 5.0 },
///   "cement": { "bags": 9, "mass_kg": 338.82 },
///   "sand": { "bags": 22, "mass_kg": 847.06, "volume_m3": 0.529, "volume_cu_ft": 19 },
///   "gravel": { "bags": 43, "mass_kg": 1694.12, "volume_m3": 1.129, "volume_cu_ft": 40 },
///   "water": { "base_liters": 96 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialEstimate {
    pub volume_m3: f64,
    pub mix_ratio: MixRatio,
    pub cement: CementQuantity,
    pub sand: AggregateQuantity,
    pub gravel: AggregateQuantity,
    pub water: WaterQuantity,
}

impl MaterialEstimate {
    /// Combined cement + sand + gravel mass (kg)
    pub fn total_mass_kg(&self) -> f64 {
        self.cement.mass_kg + self.sand.mass_kg + self.gravel.mass_kg
    }
}

/// Estimate materials for `volume_m3` of concrete.
///
/// Does not validate the volume; callers reject non-positive volumes first
/// (see [`crate::calculations::calculate`]).
pub fn estimate(volume_m3: f64, element: ElementKind, psi: PsiClass) -> MaterialEstimate {
    estimate_with_ratio(volume_m3, mix_ratio(element, psi))
}

/// Estimate materials using an explicit mix ratio.
pub fn estimate_with_ratio(volume_m3: f64, ratio: MixRatio) -> MaterialEstimate {
    let parts_sum = ratio.parts_sum();
    let total_mass_kg = volume_m3 * CONCRETE_DENSITY_KG_M3;

    let cement_kg = ratio.cement / parts_sum * total_mass_kg;
    let sand_kg = ratio.sand / parts_sum * total_mass_kg;
    let gravel_kg = ratio.gravel / parts_sum * total_mass_kg;

    MaterialEstimate {
        volume_m3,
        mix_ratio: ratio,
        cement: CementQuantity {
            bags: ceil_count(cement_kg / BAG_MASS_KG),
            mass_kg: cement_kg,
        },
        sand: AggregateQuantity::from_mass(sand_kg, SAND_BULK_DENSITY_KG_M3),
        gravel: AggregateQuantity::from_mass(gravel_kg, GRAVEL_BULK_DENSITY_KG_M3),
        water: WaterQuantity {
            base_liters: ceil_count(volume_m3 * WATER_L_PER_M3),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_slab() {
        // 4 m x 3 m x 0.1 m slab at 3000 psi, mix 1 : 2.5 : 5
        let volume = 4.0 * 3.0 * 0.1;
        let est = estimate(volume, ElementKind::Slab, PsiClass::Psi3000);

        assert!((est.cement.mass_kg - 338.8235).abs() < 1e-3);
        assert!((est.sand.mass_kg - 847.0588).abs() < 1e-3);
        assert!((est.gravel.mass_kg - 1694.1176).abs() < 1e-3);

        assert_eq!(est.cement.bags, 9);
        assert_eq!(est.sand.bags, 22);
        assert_eq!(est.gravel.bags, 43);

        assert!((est.sand.volume_m3 - 0.529).abs() < 1e-3);
        assert!((est.gravel.volume_m3 - 1.129).abs() < 1e-3);
        assert_eq!(est.sand.volume_cu_ft, 19);
        assert_eq!(est.gravel.volume_cu_ft, 40);

        assert_eq!(est.water.base_liters, 96);
    }

    #[test]
    fn test_mass_conservation() {
        for element in ElementKind::ALL {
            for psi in PsiClass::ALL.into_iter().chain([PsiClass::Unlisted(1234)]) {
                for volume in [0.01, 0.5, 1.2, 7.77, 250.0] {
                    let est = estimate(volume, element, psi);
                    let expected = volume * CONCRETE_DENSITY_KG_M3;
                    assert!(
                        (est.total_mass_kg() - expected).abs() < 1e-9 * expected.max(1.0),
                        "{element:?} {psi:?} {volume}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bag_counts_monotonic_in_volume() {
        for element in ElementKind::ALL {
            let mut previous = estimate(0.0, element, PsiClass::Psi4000);
            for step in 1..=400 {
                let volume = step as f64 * 0.0137;
                let current = estimate(volume, element, PsiClass::Psi4000);
                assert!(current.cement.bags >= previous.cement.bags);
                assert!(current.sand.bags >= previous.sand.bags);
                assert!(current.gravel.bags >= previous.gravel.bags);
                assert!(current.water.base_liters >= previous.water.base_liters);
                previous = current;
            }
        }
    }

    #[test]
    fn test_unlisted_psi_matches_default_ratio() {
        let fallback = estimate(2.0, ElementKind::Slab, PsiClass::from(9999));
        let explicit = estimate_with_ratio(2.0, MixRatio::new(1.0, 2.0, 4.0));
        assert_eq!(fallback, explicit);
    }

    #[test]
    fn test_ceil_count() {
        assert_eq!(ceil_count(0.0), 0);
        assert_eq!(ceil_count(-3.0), 0);
        assert_eq!(ceil_count(f64::NAN), 0);
        assert_eq!(ceil_count(8.47), 9);
        assert_eq!(ceil_count(96.00000000000001), 96);
        assert_eq!(ceil_count(96.001), 97);
    }
}
