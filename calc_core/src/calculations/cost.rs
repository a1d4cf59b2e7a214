//! # Material Cost
//!
//! Prices the estimate: bags × price per bag for cement, sand, and gravel,
//! liters × price per liter for water.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::cost::{cost, Currency, PriceSheet};
//! use calc_core::calculations::estimate::estimate;
//! use calc_core::materials::{ElementKind, PsiClass};
//!
//! let est = estimate(1.2, ElementKind::Slab, PsiClass::Psi3000);
//! let prices = PriceSheet {
//!     cement_per_bag: 250.0,
//!     currency: Currency::Php,
//!     ..PriceSheet::default()
//! };
//! let costs = cost(&est, 96, &prices);
//! assert_eq!(costs.cement, 9.0 * 250.0);
//! assert_eq!(costs.total, costs.cement);
//! ```

use serde::{Deserialize, Serialize};

use super::estimate::MaterialEstimate;

/// Pricing currency.
///
/// Only the symbol matters; no exchange rates are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Philippine peso
    #[default]
    Php,
    /// US dollar
    Usd,
    /// Euro, also used for any unrecognized currency
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Php, Currency::Usd, Currency::Eur];

    /// Three-letter code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Php => "PHP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Php => "₱",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Resolve a currency code. Unknown codes resolve to [`Currency::Eur`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "PHP" => Currency::Php,
            "USD" => Currency::Usd,
            _ => Currency::Eur,
        }
    }

    /// Render an amount with this currency's symbol and two decimals
    pub fn format(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol(), amount)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unit prices supplied with each calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSheet {
    pub cement_per_bag: f64,
    pub sand_per_bag: f64,
    pub gravel_per_bag: f64,
    pub water_per_liter: f64,
    pub currency: Currency,
}

/// Line costs and total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub cement: f64,
    pub sand: f64,
    pub gravel: f64,
    pub water: f64,
    pub total: f64,
    pub currency: Currency,
}

/// Cost of an estimate given the (adjusted) water volume in liters.
pub fn cost(estimate: &MaterialEstimate, water_liters: u32, prices: &PriceSheet) -> CostBreakdown {
    let cement = estimate.cement.bags as f64 * prices.cement_per_bag;
    let sand = estimate.sand.bags as f64 * prices.sand_per_bag;
    let gravel = estimate.gravel.bags as f64 * prices.gravel_per_bag;
    let water = water_liters as f64 * prices.water_per_liter;

    CostBreakdown {
        cement,
        sand,
        gravel,
        water,
        total: cement + sand + gravel + water,
        currency: prices.currency,
    }
}
