//! Component manifest: which stylesheets and scripts each component declares.
//!
//! The manifest is a static mapping from component identifier to a
//! [`ManifestEntry`]. It is loaded once per request cycle and never written back.
//!
//! # File Format
//!
//! JSON (default, `blocks-manifest.json`) or TOML (any path ending in `.toml`):
//!
//! ```json
//! {
//!   "img2html/molecule-card": {
//!     "style": ["blocks/molecules/card/style.css"],
//!     "script": "blocks/molecules/card/view.js",
//!     "deps_script": ["wp-dom-ready"],
//!     "version": "1.0.0",
//!     "defer": true
//!   }
//! }
//! ```
//!
//! `style` and `script` accept a single path or a list. Every other field is optional.
//!
//! # Absence vs. Malformation
//!
//! Both a missing file and a file that does not decode to a mapping mean
//! "no manifest": [`ComponentManifest::load_optional`] returns `None` and the
//! asset resolver turns every pass into a no-op. [`ComponentManifest::load`]
//! keeps the distinction for callers (the CLI) that want to report it.

use crate::core::BlockwrightError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Declared assets of a single component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Stylesheets, relative to the theme root
    #[serde(default, deserialize_with = "one_or_many")]
    pub style: Vec<String>,

    /// Scripts, relative to the theme root
    #[serde(default, deserialize_with = "one_or_many")]
    pub script: Vec<String>,

    /// Handles the stylesheets depend on
    #[serde(default, deserialize_with = "one_or_many")]
    pub deps_style: Vec<String>,

    /// Handles the scripts depend on
    #[serde(default, deserialize_with = "one_or_many")]
    pub deps_script: Vec<String>,

    /// Explicit cache-busting version; file modification time is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Load scripts with the `async` hint
    #[serde(default, rename = "async")]
    pub load_async: bool,

    /// Load scripts with the `defer` hint
    #[serde(default, rename = "defer")]
    pub load_deferred: bool,
}

/// Immutable mapping from component identifier to its declared assets.
///
/// Iteration order is the identifiers' sort order, so every resolution pass emits
/// instructions in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentManifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl ComponentManifest {
    /// Build a manifest from `(identifier, entry)` pairs.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (impl Into<String>, ManifestEntry)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Entry for `component`, if declared.
    pub fn get(&self, component: &str) -> Option<&ManifestEntry> {
        self.entries.get(component)
    }

    /// All entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no component is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode manifest text. `.toml` paths are TOML, everything else JSON.
    ///
    /// # Errors
    ///
    /// [`BlockwrightError::ManifestParseError`] when the text is not a mapping of
    /// component identifiers to entries.
    pub fn parse(text: &str, path: &Path) -> Result<Self, BlockwrightError> {
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let parsed = if is_toml {
            toml::from_str::<Self>(text).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<Self>(text).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| BlockwrightError::ManifestParseError {
            file: path.display().to_string(),
            reason,
        })
    }

    /// Load the manifest at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// [`BlockwrightError::ManifestParseError`] when the file cannot be read or
    /// decoded.
    pub fn load(path: &Path) -> Result<Option<Self>, BlockwrightError> {
        if !path.exists() {
            debug!("No component manifest at {}", path.display());
            return Ok(None);
        }

        let text =
            std::fs::read_to_string(path).map_err(|e| BlockwrightError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let manifest = Self::parse(&text, path)?;
        debug!("Loaded {} manifest entries from {}", manifest.len(), path.display());
        Ok(Some(manifest))
    }

    /// Load the manifest at `path`, treating a malformed file like a missing one.
    pub fn load_optional(path: &Path) -> Option<Self> {
        match Self::load(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!("Ignoring component manifest: {}", e);
                None
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(single) => vec![single],
        OneOrMany::Many(list) => list,
    })
}
