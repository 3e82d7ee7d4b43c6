//! Core error types for keepintouch-core.
//!
//! Scheduling itself never fails; these errors cover the fallible edges
//! around it: configuration, the contact store and input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for keepintouch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Contact store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Contact store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the store file
    #[error("Failed to read contacts from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the store file
    #[error("Failed to write contacts to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store content is not valid JSON for contact records
    #[error("Malformed contact store at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record failed validation
    #[error("Invalid contact record '{name}': {source}")]
    InvalidRecord {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Adjustable weight must be strictly positive and finite
    #[error("Invalid weight {weight}: must be a positive finite number")]
    NonPositiveWeight { weight: f64 },

    /// Month/day pair that no year can hold
    #[error("Invalid month/day: {month:02}-{day:02}")]
    InvalidMonthDay { month: u32, day: u32 },

    /// Unparseable date-like input
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
