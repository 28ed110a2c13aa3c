mod config;

pub use config::{AssetsConfig, AudioConfig, Config, LoggingConfig, UiConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `<config dir>/tepang/` (e.g. `~/.config/tepang/` on Linux).
///
/// Only configuration lives here; timer state is never written to disk.
///
/// # Errors
/// Returns an error if the platform has no config directory or if
/// creating it fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or(ConfigError::NoConfigDir)?
        .join("tepang");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
