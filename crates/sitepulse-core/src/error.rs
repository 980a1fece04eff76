//! Core error types for sitepulse-core.
//!
//! The scoring calculators themselves never fail -- every division is
//! guarded and every score is clamped. Errors only arise at the edges:
//! loading configuration, fetching metrics snapshots, and opt-in input
//! validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sitepulse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Metrics-source errors
    #[error("Metrics source error: {0}")]
    Source(#[from] SourceError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors reported by metrics sources.
///
/// The fetch layer is the only part of the system that may fail at
/// runtime; the engine must never be invoked without a snapshot.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Requested project has no snapshot in this source
    #[error("No metrics snapshot for project '{project}'")]
    NotFound { project: String },

    /// Source could not be read at all
    #[error("Metrics source '{path}' unavailable: {message}")]
    Unavailable { path: String, message: String },

    /// Source was read but its contents could not be decoded
    #[error("Malformed metrics snapshot: {0}")]
    Malformed(String),
}

/// Validation errors for metrics snapshots.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid project window
    #[error("Invalid project window: end_date ({end}) must be after start_date ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Invalid field value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
