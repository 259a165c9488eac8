//! Energy and pressure calculation.
//!
//! Pressure compares the assumed workload (`base_load`, in hours) against
//! the available hour budget. A value of 60 means the workload exactly
//! matches the budget; the score is unbounded above 100.

use serde::{Deserialize, Serialize};

use super::types::{PressureLevel, UserInput};
use crate::error::ValidationError;
use crate::storage::PressureConfig;

/// Score produced when workload equals the hour budget.
pub const PRESSURE_SCALE: f64 = 60.0;
/// Lowest score classified as `high`.
pub const HIGH_PRESSURE_THRESHOLD: i64 = 85;
/// Lowest score classified as `medium`.
pub const MEDIUM_PRESSURE_THRESHOLD: i64 = 50;
/// Score forced in survival mode.
pub const SURVIVAL_PRESSURE: i64 = 100;

/// Intermediate result of the pressure stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PressureReading {
    pub total_energy: u64,
    /// Workload after self-test deductions, may be negative
    pub base_load: i64,
    pub pressure: i64,
    pub level: PressureLevel,
}

/// Workload assumption for the level minus one deduction per passed self-test.
///
/// Not floored: small base loads combined with every deduction go negative.
pub fn base_load(config: &PressureConfig, input: &UserInput) -> i64 {
    let deductions = i64::from(input.self_test.passed_count()) * config.self_test_deduction;
    config.base_load_hours.for_level(input.level) - deductions
}

/// `round(base_load / total_energy * 60)`, rounding half away from zero.
pub fn raw_pressure(base_load: i64, total_energy: u64) -> i64 {
    ((base_load as f64 / total_energy as f64) * PRESSURE_SCALE).round() as i64
}

/// Map a numeric score onto the non-survival tiers.
pub fn classify(pressure: i64) -> PressureLevel {
    if pressure >= HIGH_PRESSURE_THRESHOLD {
        PressureLevel::High
    } else if pressure >= MEDIUM_PRESSURE_THRESHOLD {
        PressureLevel::Medium
    } else {
        PressureLevel::Easy
    }
}

/// Run the full pressure stage, including the survival override.
pub fn assess(config: &PressureConfig, input: &UserInput) -> Result<PressureReading, ValidationError> {
    input.validate()?;

    let total_energy = input.total_energy();
    let base_load = base_load(config, input);

    if input.days_remaining < config.survival_threshold_days {
        return Ok(PressureReading {
            total_energy,
            base_load,
            pressure: SURVIVAL_PRESSURE,
            level: PressureLevel::Survival,
        });
    }

    let pressure = raw_pressure(base_load, total_energy);
    Ok(PressureReading {
        total_energy,
        base_load,
        pressure,
        level: classify(pressure),
    })
}
