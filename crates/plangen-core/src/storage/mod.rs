mod config;

pub use config::{AllocationConfig, BaseLoadConfig, PlannerConfig, PressureConfig, MIN_SURVIVAL_THRESHOLD_DAYS};

use std::path::PathBuf;

/// Returns the configuration directory.
///
/// `PLANGEN_HOME` wins when set. Otherwise `~/.config/plangen[-dev]/`,
/// where `PLANGEN_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("PLANGEN_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("PLANGEN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("plangen-dev")
            } else {
                base_dir.join("plangen")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
