//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/classy-store/`
//! - macOS: `~/Library/Application Support/classy-store/`
//! - Windows: `%APPDATA%\classy-store\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "classy-store";

/// Get the application config directory
///
/// Unlike a cache directory this is never created here; a missing directory
/// simply means there is no config to load.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to the store config file in the platform config directory
pub fn store_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
