//! On-demand asset resolution.
//!
//! Decides which stylesheets and scripts a rendering context needs, based on
//! what actually appears on the page:
//!
//! - **Editor context**: everything the manifest declares plus every shared
//!   component file, since the editor must be able to preview any component
//! - **Document context**: manifest assets of the components a stored document mentions
//! - **Render time**: per rendered component instance, its manifest assets plus
//!   the shared-component assets inferred from the class names in its markup
//!
//! Shared-component bases are loaded at most once per request, tracked by an
//! explicit [`EnqueuedAssetSet`] that the caller owns for the duration of the
//! request. Manifest-declared assets are keyed by component × path instead.
//!
//! # Resolution Strategy
//!
//! For a shared-component base, a chain of [`BaseLookup`] strategies proposes
//! candidate files in order ([`ConventionLookup`], then [`FallbackPrefixLookup`]);
//! the first candidate present in the [`AssetSource`] wins, and its minified
//! sibling is preferred when one exists.
//!
//! Missing files are never errors: the resolver is best-effort and simply
//! emits fewer instructions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use blockwright::assets::{AssetResolver, EnqueuedAssetSet, ResolverSettings, ThemeFiles};
//! use blockwright::config::EngineConfig;
//! use blockwright::manifest::ComponentManifest;
//! use blockwright::tree::ComponentNode;
//! use std::path::Path;
//!
//! let config = EngineConfig::default();
//! let theme = Path::new("/srv/theme");
//! let manifest = ComponentManifest::load_optional(&theme.join(&config.manifest));
//! let resolver = AssetResolver::new(
//!     ThemeFiles::new(theme, &config.theme_uri),
//!     ResolverSettings::from(&config),
//! );
//!
//! let mut enqueued = EnqueuedAssetSet::new();
//! let node = ComponentNode::new("img2html/molecule-card");
//! let markup = r#"<div class="img2html-card"><a class="img2html-button--primary">Go</a></div>"#;
//! for instruction in resolver.resolve_on_render(markup, &node, manifest.as_ref(), &mut enqueued) {
//!     println!("{} {}", instruction.handle, instruction.uri);
//! }
//! ```

pub mod classes;
pub mod lookup;
pub mod render;
pub mod resolver;
pub mod source;

pub use lookup::{BaseLookup, ConventionLookup, FallbackPrefixLookup};
pub use render::{ComponentRenderer, StoredMarkupRenderer};
pub use resolver::{AssetResolver, ResolverSettings};
pub use source::{AssetSource, ThemeFiles};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

/// Kind of asset a load instruction refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A stylesheet (`.css`)
    Style,
    /// A script (`.js`)
    Script,
}

impl AssetKind {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Style => "css",
            Self::Script => "js",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style => write!(f, "style"),
            Self::Script => write!(f, "script"),
        }
    }
}

/// Why an asset is being loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetOrigin {
    /// Declared by a component's manifest entry
    Manifest {
        /// Declaring component
        component: String,
    },
    /// Inferred shared-component file
    SharedComponent {
        /// Canonical base identifier the file was resolved for
        base: String,
    },
}

/// One asset the host should load for the current context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadInstruction {
    /// Style or script
    pub kind: AssetKind,
    /// Stable handle identifying this asset to the host
    pub handle: String,
    /// Path relative to the theme root (the minified variant when one was chosen)
    pub path: String,
    /// Public URI
    pub uri: String,
    /// Handles this asset depends on
    pub deps: Vec<String>,
    /// Cache-busting version
    pub version: String,
    /// Scripts load in the footer
    pub in_footer: bool,
    /// `async` hint
    pub load_async: bool,
    /// `defer` hint
    pub load_deferred: bool,
    /// What caused this load
    pub origin: AssetOrigin,
}

/// Request-scoped record of what has already been resolved.
///
/// Create one per request (or render cycle) and pass it to every
/// [`AssetResolver::resolve_on_render`] call of that request, in render order.
#[derive(Debug, Clone, Default)]
pub struct EnqueuedAssetSet {
    seen_component_bases: HashSet<String>,
    handles: HashSet<String>,
}

impl EnqueuedAssetSet {
    /// An empty set, as at the start of a request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `base` has already been resolved this request.
    pub fn contains_base(&self, base: &str) -> bool {
        self.seen_component_bases.contains(base)
    }

    /// Record `base` as resolved. Returns `false` if it already was.
    pub fn mark_base(&mut self, base: impl Into<String>) -> bool {
        self.seen_component_bases.insert(base.into())
    }

    /// Claim a handle for emission. Returns `false` if it was emitted before.
    pub fn claim_handle(&mut self, handle: &str) -> bool {
        if self.handles.contains(handle) {
            return false;
        }
        self.handles.insert(handle.to_string())
    }

    /// Number of distinct shared-component bases resolved so far.
    pub fn base_count(&self) -> usize {
        self.seen_component_bases.len()
    }

    /// Forget everything, as at the start of a new request.
    pub fn reset(&mut self) {
        self.seen_component_bases.clear();
        self.handles.clear();
    }
}

/// Build a stable handle `<prefix>-<group>-<hash>` from the identifying parts.
pub(crate) fn asset_handle(prefix: &str, group: &str, key: &str, path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(path.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{prefix}-{group}-{}", &digest[..12])
}
