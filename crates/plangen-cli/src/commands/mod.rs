pub mod completions;
pub mod config;
pub mod plan;

use std::path::Path;

use plangen_core::PlannerConfig;

/// Load the planner config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => PlannerConfig::load_from(path)?,
        None => PlannerConfig::load()?,
    };
    Ok(config)
}
