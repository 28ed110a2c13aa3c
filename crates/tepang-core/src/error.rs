//! Core error types for tepang-core.
//!
//! Playback failures never reach the state machines; they are logged where
//! they happen. The remaining variants cover configuration and I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tepang-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

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

    /// No config directory on this platform
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Media playback failures.
///
/// Only ever logged: the timer and the music player keep their flags no
/// matter which of these comes back.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No output device could be opened
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    /// The asset file could not be opened
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The asset could not be decoded
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
