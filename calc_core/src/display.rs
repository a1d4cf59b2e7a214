//! # Result Display
//!
//! Chooses metric or imperial presentation from the units the user typed,
//! and renders the strings a UI shows for each material and cost line.
//! Nothing here changes a computed quantity.
//!
//! ## Family Rule
//!
//! Imperial only when every dimension was entered in feet or inches. Any
//! metric unit (or a mix) keeps the display metric.
//!
//! ## Formats
//!
//! | Line   | Metric                         | Imperial                          |
//! |--------|--------------------------------|-----------------------------------|
//! | Cement | `9 bags (339 kg)`              | `9 bags (747 lb)`                 |
//! | Sand   | `22 bags (847 kg) - 0.529 m³`  | `22 bags (1867 lb) - 19 cu ft`    |
//! | Gravel | `43 bags (1694 kg) - 1.129 m³` | `43 bags (3735 lb) - 40 cu ft`    |
//! | Water  | `96 L`                         | `26 gallons (96 L)`               |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::display::{detect_family, UnitFamily};
//! use calc_core::units::LengthUnit::{Foot, Inch, Meter};
//!
//! assert_eq!(detect_family(&[Foot, Inch, Foot]), UnitFamily::Imperial);
//! assert_eq!(detect_family(&[Foot, Meter, Foot]), UnitFamily::Metric);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::cost::CostBreakdown;
use crate::calculations::estimate::{AggregateQuantity, CementQuantity};
use crate::calculations::CalculationResult;
use crate::units::{Gallons, Kilograms, LengthUnit, Liters, Pounds};

/// Measurement system used for result strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    #[default]
    Metric,
    Imperial,
}

/// Imperial iff there is at least one unit and all are feet or inches.
pub fn detect_family(units: &[LengthUnit]) -> UnitFamily {
    if !units.is_empty() && units.iter().all(LengthUnit::is_imperial) {
        UnitFamily::Imperial
    } else {
        UnitFamily::Metric
    }
}

/// Strings for every result line, keyed the way the results panel is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplaySummary {
    pub family: UnitFamily,
    pub cement_qty: String,
    pub sand_qty: String,
    pub gravel_qty: String,
    pub water_qty: String,
    pub cement_cost: String,
    pub sand_cost: String,
    pub gravel_cost: String,
    pub water_cost: String,
    pub total_cost: String,
}

impl DisplaySummary {
    /// Render a calculation result in the family implied by its input units.
    pub fn from_result(result: &CalculationResult) -> Self {
        let family = detect_family(&result.units);
        Self::render(result, family)
    }

    /// Render a calculation result in an explicit family.
    pub fn render(result: &CalculationResult, family: UnitFamily) -> Self {
        let est = &result.estimate;
        let water = result.adjusted_water_liters;
        let (cement_qty, sand_qty, gravel_qty, water_qty) = match family {
            UnitFamily::Metric => (
                metric_cement(&est.cement),
                metric_aggregate(&est.sand),
                metric_aggregate(&est.gravel),
                format!("{} L", water),
            ),
            UnitFamily::Imperial => (
                imperial_cement(&est.cement),
                imperial_aggregate(&est.sand),
                imperial_aggregate(&est.gravel),
                format!("{} gallons ({} L)", gallons_rounded_up(water), water),
            ),
        };
        let [cement_cost, sand_cost, gravel_cost, water_cost, total_cost] = format_costs(&result.costs);

        DisplaySummary {
            family,
            cement_qty,
            sand_qty,
            gravel_qty,
            water_qty,
            cement_cost,
            sand_cost,
            gravel_cost,
            water_cost,
            total_cost,
        }
    }
}

/// Whole kilograms as shown in the metric display
fn whole_kg(mass_kg: f64) -> u64 {
    mass_kg.round() as u64
}

/// Pounds from the displayed (already rounded) kilograms
fn whole_lb(mass_kg: f64) -> u64 {
    let lb: Pounds = Kilograms(whole_kg(mass_kg) as f64).into();
    lb.0.round() as u64
}

fn gallons_rounded_up(liters: u32) -> u32 {
    let gal: Gallons = Liters(liters as f64).into();
    gal.0.ceil() as u32
}

/// Fixed decimals with trailing zeros dropped ("0.529", "1.2", "2")
pub fn format_decimal(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value);
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn metric_cement(q: &CementQuantity) -> String {
    format!("{} bags ({} kg)", q.bags, whole_kg(q.mass_kg))
}

fn metric_aggregate(q: &AggregateQuantity) -> String {
    format!(
        "{} bags ({} kg) - {} m³",
        q.bags,
        whole_kg(q.mass_kg),
        format_decimal(q.volume_m3, 3)
    )
}

fn imperial_cement(q: &CementQuantity) -> String {
    format!("{} bags ({} lb)", q.bags, whole_lb(q.mass_kg))
}

fn imperial_aggregate(q: &AggregateQuantity) -> String {
    format!(
        "{} bags ({} lb) - {} cu ft",
        q.bags,
        whole_lb(q.mass_kg),
        q.volume_cu_ft
    )
}

/// Cement, sand, gravel, water, total
fn format_costs(costs: &CostBreakdown) -> [String; 5] {
    [costs.cement, costs.sand, costs.gravel, costs.water, costs.total].map(|c| costs.currency.format(c))
}
