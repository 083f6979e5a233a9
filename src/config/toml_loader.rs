//! TOML configuration file parsing.
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Deserialize a TOML file into `T`.
///
/// A missing file deserializes as empty TOML, so `T` gets its defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        // Return empty config for missing files by deserializing empty TOML
        return toml::from_str("").context("Failed to create empty config");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
}
