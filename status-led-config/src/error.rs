//! Error types for status-led-config

use std::fmt;

/// Errors produced while loading or validating `status_led.toml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error
    FileRead { path: String, message: String },
    /// TOML parsing error
    TomlParse { path: String, message: String },
    /// Validation error with context
    Validation { field: String, message: String },
    /// Invalid value
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
            ConfigError::TomlParse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            ConfigError::Validation { field, message } => {
                write!(f, "Validation error in '{}': {}", field, message)
            }
            ConfigError::InvalidValue {
                field,
                value,
                expected,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for '{}', expected: {}",
                    value, field, expected
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;
