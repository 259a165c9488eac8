//! Exam preparation plan allocation engine.
//!
//! A plan is computed in four forward-only stages:
//! - pressure: total energy, pressure score and tier (with survival override)
//! - recommendation: fixed advice for the tier
//! - weights: per-level phase split, adjusted by self-test answers
//! - allocation: hours, day spans, dates and module content
//!
//! The engine is pure. The current date is passed in by the caller so the
//! same input always yields the same plan.

mod allocator;
mod pressure;
mod recommendation;
mod types;
mod weights;

pub use allocator::{format_date, format_date_range, MIN_DESENSITIZATION_HOURS};
pub use pressure::{
    assess, base_load, classify, raw_pressure, PressureReading, HIGH_PRESSURE_THRESHOLD,
    MEDIUM_PRESSURE_THRESHOLD, SURVIVAL_PRESSURE,
};
pub use recommendation::recommendation_for;
pub use types::{
    ModuleId, PlanState, PressureLevel, SelfTest, StudyPlanModule, UserInput, UserLevel,
};
pub use weights::{resolve_weights, PhaseWeights, WeightTable, WEIGHT_SUM_EPSILON};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::storage::PlannerConfig;

/// Compute a plan, validating both the input and the configuration.
///
/// # Errors
///
/// Returns a validation error when `days_remaining` or `daily_hours` is
/// zero or the timeline runs past the calendar chrono can represent, and a
/// configuration error when `config` fails
/// [`PlannerConfig::validate`].
pub fn compute_plan(input: &UserInput, today: NaiveDate, config: &PlannerConfig) -> Result<PlanState> {
    config.validate()?;
    allocate(input, today, config)
}

fn allocate(input: &UserInput, today: NaiveDate, config: &PlannerConfig) -> Result<PlanState> {
    let reading = assess(&config.pressure, input)?;
    let recommendation = recommendation_for(reading.level).to_string();
    debug!(
        days = input.days_remaining,
        hours = input.daily_hours,
        level = %input.level,
        pressure = reading.pressure,
        tier = %reading.level,
        "pressure assessed"
    );

    if reading.level == PressureLevel::Survival {
        return Ok(PlanState {
            pressure: reading.pressure,
            pressure_level: reading.level,
            total_energy: reading.total_energy,
            recommendation,
            modules: vec![allocator::survival_module(input, today, reading.total_energy)?],
        });
    }

    let weights = resolve_weights(
        &config.allocation.weights,
        input.level,
        &input.self_test,
        config.allocation.shift_containers_weight,
    );
    debug!(?weights, "phase weights resolved");

    let modules = allocator::build_modules(
        input,
        today,
        reading.total_energy,
        &weights,
        config.allocation.theory_hours_total,
    )?;

    Ok(PlanState {
        pressure: reading.pressure,
        pressure_level: reading.level,
        total_energy: reading.total_energy,
        recommendation,
        modules,
    })
}

/// Plan engine bound to a validated configuration.
#[derive(Debug, Clone)]
pub struct PlanEngine {
    config: PlannerConfig,
}

impl PlanEngine {
    /// Create an engine with the built-in constants.
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// Create an engine with custom constants.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Compute a plan anchored at `today`.
    pub fn compute(&self, input: &UserInput, today: NaiveDate) -> Result<PlanState> {
        allocate(input, today, &self.config)
    }
}

impl Default for PlanEngine {
    fn default() -> Self {
        Self::new()
    }
}
