//! Engine configuration (`blockwright.toml`).
//!
//! One TOML file at the theme root controls naming conventions, directory
//! layout, the shared-component skip list, and mining parameters. Every field
//! has a default, so a missing file is equivalent to an empty one.
//!
//! ```toml
//! naming_prefix = "acme"
//! theme_uri = "https://example.com/wp-content/themes/acme"
//!
//! [skip_bases]
//! "img2html/molecule-card" = ["img2html-card", "acme-card"]
//!
//! [mining]
//! min_support = 3
//! container_types = ["core/group", "core/columns"]
//! ```
//!
//! The skip list is data, not logic: it names components whose own stylesheet
//! already covers their root class, so the shared-component copy of that class
//! is not loaded again. Whether this should be derived automatically from the
//! component name is deliberately left to configuration.

mod parser;

pub use parser::parse_config;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name looked up at the theme root.
pub const CONFIG_FILE: &str = "blockwright.toml";

/// Canonical naming prefix shipped with the shared component assets.
pub const DEFAULT_PREFIX: &str = "img2html";

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Active naming prefix for shared-component class names (`<prefix>-card`)
    pub naming_prefix: String,

    /// Prefix the shared component files are shipped under
    pub default_prefix: String,

    /// Public base URI of the theme root; asset URIs are `<theme_uri>/<relative path>`
    pub theme_uri: String,

    /// Component manifest, relative to the theme root
    pub manifest: PathBuf,

    /// Shared components directory, relative to the theme root
    pub components_dir: String,

    /// Where mined templates are written, relative to the theme root
    pub patterns_dir: PathBuf,

    /// Where generated documentation is written, relative to the theme root
    pub docs_dir: PathBuf,

    /// Directory backing the persisted key-value records, relative to the theme root
    pub store_dir: PathBuf,

    /// Directory holding the published page corpus, relative to the theme root
    pub pages_dir: PathBuf,

    /// Component identifier → class-name prefixes its own stylesheet already covers
    pub skip_bases: BTreeMap<String, Vec<String>>,

    /// Pattern mining parameters
    pub mining: MiningConfig,
}

/// Pattern mining parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Maximum window length for sequence signatures
    pub window: usize,

    /// Window length used when the extended window is requested
    pub extended_window: usize,

    /// Minimum occurrences before a signature becomes a template
    pub min_support: usize,

    /// Maximum number of pages scanned per run
    pub max_pages: usize,

    /// Signatures kept per kind in the persisted report
    pub top_n: usize,

    /// Component identifiers treated as containers for group signatures
    pub container_types: Vec<String>,

    /// Registration category for generated templates; the naming prefix when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            naming_prefix: DEFAULT_PREFIX.to_string(),
            default_prefix: DEFAULT_PREFIX.to_string(),
            theme_uri: format!("/wp-content/themes/{DEFAULT_PREFIX}"),
            manifest: PathBuf::from("blocks-manifest.json"),
            components_dir: "assets/components".to_string(),
            patterns_dir: PathBuf::from("patterns"),
            docs_dir: PathBuf::from("docs"),
            store_dir: PathBuf::from(".blockwright"),
            pages_dir: PathBuf::from("content"),
            skip_bases: default_skip_bases(),
            mining: MiningConfig::default(),
        }
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            window: 3,
            extended_window: 4,
            min_support: 2,
            max_pages: 200,
            top_n: 25,
            container_types: vec![
                "core/group".to_string(),
                "core/columns".to_string(),
                "core/cover".to_string(),
            ],
            category: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but is not valid TOML for this
    /// structure, or when the values fail [`EngineConfig::validate`].
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            parse_config::<Self>(path)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load `blockwright.toml` from the theme root, or from an explicit override path.
    pub fn load_for_theme(theme_root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::load(&theme_root.join(CONFIG_FILE)),
        }
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.naming_prefix.is_empty() || self.default_prefix.is_empty() {
            anyhow::bail!("naming_prefix and default_prefix must not be empty");
        }
        if self.mining.window < 2 || self.mining.extended_window < 2 {
            anyhow::bail!("mining windows must be at least 2 components long");
        }
        if self.mining.min_support == 0 {
            anyhow::bail!("mining.min_support must be at least 1");
        }
        Ok(())
    }

    /// Template registration category.
    pub fn pattern_category(&self) -> &str {
        self.mining.category.as_deref().unwrap_or(&self.naming_prefix)
    }
}

fn default_skip_bases() -> BTreeMap<String, Vec<String>> {
    [
        ("organism-hero", "hero"),
        ("molecule-card", "card"),
        ("molecule-testimonial", "testimonial"),
        ("molecule-features-list", "features-list"),
        ("molecule-team-member", "team-member"),
        ("atom-button", "button"),
        ("atom-container", "container"),
        ("atom-icon", "icon"),
        ("atom-paragraph", "paragraph"),
        ("atom-input", "input"),
        ("atom-badge", "badge"),
        ("atom-link", "link"),
    ]
    .into_iter()
    .map(|(component, base)| {
        (format!("{DEFAULT_PREFIX}/{component}"), vec![format!("{DEFAULT_PREFIX}-{base}")])
    })
    .collect()
}
