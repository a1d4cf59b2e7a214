//! # Materials Database
//!
//! Static data the estimator works from: the structural element kinds, the
//! PSI strength classes, the per-element mix-ratio table, and the density
//! and packaging constants used to turn a concrete volume into purchasable
//! quantities.
//!
//! ## Constants
//!
//! | Quantity                 | Value        |
//! |--------------------------|--------------|
//! | Concrete density         | 2400 kg/m³   |
//! | Bag mass (all materials) | 40 kg        |
//! | Sand bulk density        | 1600 kg/m³   |
//! | Gravel bulk density      | 1500 kg/m³   |
//! | Water demand             | 80 L/m³      |
//!
//! These are rule-of-thumb figures for small pours, not a mix design.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::{mix_ratio, ElementKind, MixRatio, PsiClass};
//!
//! let ratio = mix_ratio(ElementKind::Slab, PsiClass::Psi3000);
//! assert_eq!(ratio, MixRatio::new(1.0, 2.5, 5.0));
//! ```

pub mod element;
pub mod mix_ratio;

pub use element::ElementKind;
pub use mix_ratio::{mix_ratio, MixRatio, PsiClass};

/// Assumed density of fresh concrete (kg/m³)
pub const CONCRETE_DENSITY_KG_M3: f64 = 2400.0;

/// Nominal bag mass used for cement, sand, and gravel bag counts (kg)
pub const BAG_MASS_KG: f64 = 40.0;

/// Loose bulk density of sand (kg/m³)
pub const SAND_BULK_DENSITY_KG_M3: f64 = 1600.0;

/// Loose bulk density of gravel (kg/m³)
pub const GRAVEL_BULK_DENSITY_KG_M3: f64 = 1500.0;

/// Base mixing water per cubic meter of concrete (L/m³).
///
/// Roughly 160 L/m³ of paste water at a 0.5 water-cement factor.
pub const WATER_L_PER_M3: f64 = 80.0;
