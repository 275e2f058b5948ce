//! Core error types for breathbox-core.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for breathbox-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings-related errors
    #[error("Settings error: {0}")]
    Config(#[from] ConfigError),

    /// Accountability-ledger errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The app data directory could not be created or resolved
    #[error("Failed to prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },

    /// Failed to save the settings record
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Accountability-ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A name outside the fixed two-person set
    #[error("Unknown person: {0}")]
    UnknownPerson(String),

    /// A time period outside morning/midday/evening
    #[error("Unknown time period: {0}")]
    UnknownPeriod(String),

    /// Failed to persist the ledger file
    #[error("Failed to save ledger to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
