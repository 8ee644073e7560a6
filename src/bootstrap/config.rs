//! # Configuration Loader
//!
//! Reads the TOML file and maps it to the [`CleanerConfig`] DTO. Defaults
//! and element id merging live with the DTO and the registry, not here.

use std::path::{Path, PathBuf};

use anyhow::Context;
use slc_core::CleanerConfig;
use tracing::debug;

const APP_DIR: &str = "share-link-cleaner";
const CONFIG_FILE: &str = "config.toml";

/// `<config_dir>/share-link-cleaner/config.toml`, when the platform has a
/// config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<CleanerConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    CleanerConfig::from_toml(&toml_value)
}

/// Load the configuration the binary should run with.
///
/// An explicit path must exist. The default path is optional: when it is
/// absent the built-in configuration is used.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<CleanerConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        Some(path) => {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(CleanerConfig::default())
        }
        None => {
            debug!("No config directory on this platform, using defaults");
            Ok(CleanerConfig::default())
        }
    }
}
