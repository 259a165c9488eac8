//! Core error types for plangen-core.
//!
//! This module defines the error hierarchy using thiserror. Plan
//! computation itself can only fail on input validation; everything else
//! belongs to the configuration layer.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for plangen-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Input validation errors.
///
/// These surface before any arithmetic runs, so a plan is either complete
/// or not produced at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A numeric input below its lower bound
    #[error("Invalid input for '{field}': must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: u32,
        value: u32,
    },

    /// The timeline would run past the last representable calendar date
    #[error("Invalid input for 'days_remaining': {days} days after {today} is out of the calendar range")]
    DateOutOfRange { today: NaiveDate, days: u32 },

    /// Level string that is not one of the recognized variants
    #[error("Invalid input for 'level': unknown level '{0}' (expected beginner, intermediate or sprint)")]
    UnknownLevel(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
