//! Generic TOML configuration parsing with file path context.

use crate::core::BlockwrightError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and deserialize a TOML file.
///
/// Decoding failures are reported as [`BlockwrightError::ConfigParseError`] so the
/// CLI can attach a suggestion; read failures keep their I/O source.
///
/// # Examples
///
/// ```rust,no_run
/// use blockwright::config::{EngineConfig, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: EngineConfig = parse_config(Path::new("blockwright.toml"))?;
/// println!("prefix: {}", config.naming_prefix);
/// # Ok(())
/// # }
/// ```
pub fn parse_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).map_err(|e| {
        BlockwrightError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
