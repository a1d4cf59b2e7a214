//! # Environmental Water Adjustment
//!
//! Nudges the base mixing water up in dry or hot weather and down in humid
//! or cool weather. This is a fixed heuristic policy, not a physical model;
//! the constants are kept exactly so results are reproducible.
//!
//! ```text
//! humidity_adj = (50 - humidity_pct) * 0.0025      centered at 50 %
//! temp_adj     = ((temperature_c - 25) / 15) * 0.05  centered at 25 °C
//! fraction     = clamp(humidity_adj + temp_adj, -0.15, +0.15)
//! adjusted     = max(1, ⌈base * (1 + fraction)⌉)
//! ```
//!
//! At 20 % humidity the humidity term is +7.5 %; at 90 % it is −10 %.
//! At 10 °C the temperature term is −5 %; at 40 °C it is +5 %.

use serde::{Deserialize, Serialize};

use super::estimate::ceil_count;

/// Humidity at which no adjustment applies (%)
pub const NEUTRAL_HUMIDITY_PCT: f64 = 50.0;

/// Temperature at which no adjustment applies (°C)
pub const NEUTRAL_TEMPERATURE_C: f64 = 25.0;

/// Water fraction per percentage point of humidity below neutral
const HUMIDITY_COEFFICIENT: f64 = 0.0025;

/// Temperature span (°C) that moves the fraction by [`TEMPERATURE_STEP`]
const TEMPERATURE_SPAN_C: f64 = 15.0;
const TEMPERATURE_STEP: f64 = 0.05;

/// Bound on the combined adjustment fraction
pub const MAX_ADJUSTMENT: f64 = 0.15;

/// Site conditions at the time of the pour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    /// Relative humidity (%), recommended 20-90
    pub humidity: f64,
    /// Air temperature (°C), recommended 10-40
    pub temperature: f64,
}

impl EnvironmentalConditions {
    pub fn new(humidity: f64, temperature: f64) -> Self {
        EnvironmentalConditions { humidity, temperature }
    }

    /// Clamped adjustment fraction for these conditions
    pub fn adjustment_fraction(&self) -> f64 {
        water_adjustment_fraction(self.humidity, self.temperature)
    }
}

impl Default for EnvironmentalConditions {
    fn default() -> Self {
        EnvironmentalConditions {
            humidity: NEUTRAL_HUMIDITY_PCT,
            temperature: NEUTRAL_TEMPERATURE_C,
        }
    }
}

/// Combined humidity and temperature fraction, clamped to ±15 %.
///
/// Non-finite inputs produce no adjustment.
pub fn water_adjustment_fraction(humidity: f64, temperature: f64) -> f64 {
    let humidity_adj = (NEUTRAL_HUMIDITY_PCT - humidity) * HUMIDITY_COEFFICIENT;
    let temp_adj = ((temperature - NEUTRAL_TEMPERATURE_C) / TEMPERATURE_SPAN_C) * TEMPERATURE_STEP;
    let total = humidity_adj + temp_adj;
    if !total.is_finite() {
        return 0.0;
    }
    total.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT)
}

/// Adjusted water demand in liters. Never less than 1.
pub fn adjust_water(base_liters: f64, humidity: f64, temperature: f64) -> u32 {
    let fraction = water_adjustment_fraction(humidity, temperature);
    ceil_count(base_liters * (1.0 + fraction)).max(1)
}
