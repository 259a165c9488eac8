//! TOML-based planner configuration.
//!
//! Holds every tunable constant of the allocation engine:
//! - Survival threshold and per-level workload assumptions
//! - Self-test deduction
//! - Theory hour reserve
//! - Phase weight tables and the weight-shift rule
//!
//! Configuration is stored at `~/.config/plangen/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::plan::{UserLevel, WeightTable};

/// Smallest survival threshold that still leaves room for three phases.
pub const MIN_SURVIVAL_THRESHOLD_DAYS: u32 = 3;

/// Workload assumption per level, in hours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseLoadConfig {
    #[serde(default = "default_beginner_load")]
    pub beginner: i64,
    #[serde(default = "default_intermediate_load")]
    pub intermediate: i64,
    #[serde(default = "default_sprint_load")]
    pub sprint: i64,
}

impl BaseLoadConfig {
    pub fn for_level(&self, level: UserLevel) -> i64 {
        match level {
            UserLevel::Beginner => self.beginner,
            UserLevel::Intermediate => self.intermediate,
            UserLevel::Sprint => self.sprint,
        }
    }
}

/// Pressure-stage constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PressureConfig {
    /// Below this many days the plan switches to survival mode.
    #[serde(default = "default_survival_threshold_days")]
    pub survival_threshold_days: u32,
    /// Hours removed from the base load per passed self-test.
    #[serde(default = "default_self_test_deduction")]
    pub self_test_deduction: i64,
    #[serde(default)]
    pub base_load_hours: BaseLoadConfig,
}

/// Allocation-stage constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationConfig {
    /// Fixed theory reserve folded into the fortification phase.
    #[serde(default = "default_theory_hours_total")]
    pub theory_hours_total: u32,
    /// Move desensitization weight into fortification when the learner
    /// already knows the basic containers.
    #[serde(default = "default_true")]
    pub shift_containers_weight: bool,
    #[serde(default)]
    pub weights: WeightTable,
}

/// Planner configuration.
///
/// Serialized to/from TOML at `~/.config/plangen/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlannerConfig {
    #[serde(default)]
    pub pressure: PressureConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
}

// Default functions
fn default_beginner_load() -> i64 {
    120
}
fn default_intermediate_load() -> i64 {
    80
}
fn default_sprint_load() -> i64 {
    50
}
fn default_survival_threshold_days() -> u32 {
    5
}
fn default_self_test_deduction() -> i64 {
    10
}
fn default_theory_hours_total() -> u32 {
    12
}
fn default_true() -> bool {
    true
}

impl Default for BaseLoadConfig {
    fn default() -> Self {
        Self {
            beginner: default_beginner_load(),
            intermediate: default_intermediate_load(),
            sprint: default_sprint_load(),
        }
    }
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            survival_threshold_days: default_survival_threshold_days(),
            self_test_deduction: default_self_test_deduction(),
            base_load_hours: BaseLoadConfig::default(),
        }
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            theory_hours_total: default_theory_hours_total(),
            shift_containers_weight: true,
            weights: WeightTable::default(),
        }
    }
}

impl PlannerConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    // Whole sections are replaced from inline JSON.
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location, `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid constants, or if the default config cannot be written.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: PlannerConfig = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key.
    ///
    /// The change is applied only if the resulting config still validates.
    /// Does not persist; call [`PlannerConfig::save`] afterwards.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: PlannerConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check the constants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pressure.survival_threshold_days < MIN_SURVIVAL_THRESHOLD_DAYS {
            return Err(ConfigError::InvalidValue {
                key: "pressure.survival_threshold_days".into(),
                message: format!(
                    "must be at least {MIN_SURVIVAL_THRESHOLD_DAYS}, got {}",
                    self.pressure.survival_threshold_days
                ),
            });
        }
        if self.pressure.self_test_deduction < 0 {
            return Err(ConfigError::InvalidValue {
                key: "pressure.self_test_deduction".into(),
                message: "must not be negative".into(),
            });
        }
        for level in UserLevel::ALL {
            let weights = self.allocation.weights.for_level(level);
            let key = format!("allocation.weights.{level}");
            if weights.has_negative() {
                return Err(ConfigError::InvalidValue {
                    key,
                    message: "weights must not be negative".into(),
                });
            }
            if !weights.is_normalized() {
                return Err(ConfigError::InvalidValue {
                    key,
                    message: format!("weights must sum to 1.0, got {:.4}", weights.sum()),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = PlannerConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PlannerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: PlannerConfig = toml::from_str(
            r#"
            [pressure]
            survival_threshold_days = 7
            "#,
        )
        .unwrap();
        assert_eq!(parsed.pressure.survival_threshold_days, 7);
        assert_eq!(parsed.pressure.self_test_deduction, 10);
        assert_eq!(parsed.pressure.base_load_hours.beginner, 120);
        assert_eq!(parsed.allocation.theory_hours_total, 12);
        assert!(parsed.allocation.shift_containers_weight);
    }

    #[test]
    fn config_default_values() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.pressure.survival_threshold_days, 5);
        assert_eq!(cfg.pressure.base_load_hours.beginner, 120);
        assert_eq!(cfg.pressure.base_load_hours.intermediate, 80);
        assert_eq!(cfg.pressure.base_load_hours.sprint, 50);
        assert_eq!(cfg.allocation.weights.intermediate.desensitization, 0.05);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.get("pressure.survival_threshold_days").as_deref(), Some("5"));
        assert_eq!(cfg.get("pressure.base_load_hours.sprint").as_deref(), Some("50"));
        assert_eq!(cfg.get("allocation.shift_containers_weight").as_deref(), Some("true"));
        assert!(cfg.get("pressure.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = PlannerConfig::default();
        cfg.set("pressure.survival_threshold_days", "7").unwrap();
        assert_eq!(cfg.pressure.survival_threshold_days, 7);
    }

    #[test]
    fn set_accepts_negative_base_load() {
        let mut cfg = PlannerConfig::default();
        cfg.set("pressure.base_load_hours.sprint", "-5").unwrap();
        assert_eq!(cfg.pressure.base_load_hours.sprint, -5);
    }

    #[test]
    fn set_updates_bool() {
        let mut cfg = PlannerConfig::default();
        cfg.set("allocation.shift_containers_weight", "false").unwrap();
        assert!(!cfg.allocation.shift_containers_weight);
    }

    #[test]
    fn set_replaces_weight_triple_from_json() {
        let mut cfg = PlannerConfig::default();
        cfg.set(
            "allocation.weights.beginner",
            r#"{"desensitization":0.1,"fortification":0.6,"sprint":0.3}"#,
        )
        .unwrap();
        assert_eq!(cfg.allocation.weights.beginner.desensitization, 0.1);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = PlannerConfig::default();
        let err = cfg.set("pressure.nonexistent_key", "1").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = PlannerConfig::default();
        assert!(cfg.set("allocation.shift_containers_weight", "not_a_bool").is_err());
        assert!(cfg.set("pressure.survival_threshold_days", "soon").is_err());
    }

    #[test]
    fn set_rejects_weights_that_do_not_sum_to_one() {
        let mut cfg = PlannerConfig::default();
        let result = cfg.set("allocation.weights.sprint.sprint", "0.9");
        assert!(result.is_err());
        // Unchanged on failure
        assert_eq!(cfg.allocation.weights.sprint.sprint, 0.5);
    }

    #[test]
    fn validate_rejects_small_threshold() {
        let mut cfg = PlannerConfig::default();
        cfg.pressure.survival_threshold_days = 2;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(cfg, PlannerConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = PlannerConfig::default();
        cfg.set("allocation.theory_hours_total", "20").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(loaded.allocation.theory_hours_total, 20);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "pressure = [[[").unwrap();

        assert!(PlannerConfig::load_from(&path).is_err());
    }
}
