//! # PlanGen Core Library
//!
//! This library turns a handful of self-reported study parameters into a
//! time-boxed exam preparation plan. It follows a CLI-first philosophy:
//! every operation is available through the standalone `plangen` binary,
//! and any other front end is a thin layer over the same engine.
//!
//! ## Architecture
//!
//! - **Plan Engine**: A pure, synchronous function from input to plan.
//!   The caller supplies the current date
//! - **Storage**: TOML-based configuration of every engine constant
//! - **Presentation**: Gauge readings, label tables and text export, all
//!   read-only consumers of a finished plan
//!
//! ## Key Components
//!
//! - [`PlanEngine`]: Plan computation bound to a validated configuration
//! - [`compute_plan`]: One-shot computation
//! - [`PlannerConfig`]: Engine constants and their persistence
//! - [`GaugeReading`]: Display view of the pressure score

pub mod error;
pub mod export;
pub mod gauge;
pub mod labels;
pub mod plan;
pub mod storage;

pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use gauge::GaugeReading;
pub use plan::{
    compute_plan, ModuleId, PhaseWeights, PlanEngine, PlanState, PressureLevel, SelfTest,
    StudyPlanModule, UserInput, UserLevel, WeightTable,
};
pub use storage::{data_dir, PlannerConfig};
