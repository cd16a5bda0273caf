//! Strategies that map a shared-component base to a candidate file.
//!
//! A base such as `acme-card` is looked up by each [`BaseLookup`] in turn. The
//! resolver asks the [`AssetSource`] whether the proposed path exists and moves
//! to the next strategy when it does not. Style and script are resolved
//! independently, so a theme may ship `acme-card.css` but fall back to
//! `img2html-card.js`.

use super::AssetKind;
use super::source::AssetSource;

/// Proposes a theme-relative path for a shared-component base.
pub trait BaseLookup: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Candidate path for `base`, or `None` when this strategy does not apply.
    fn candidate(&self, base: &str, kind: AssetKind) -> Option<String>;
}

/// `<dir>/<base>.<ext>`: the file is named after the class stem.
#[derive(Debug, Clone)]
pub struct ConventionLookup {
    dir: String,
}

impl ConventionLookup {
    /// Look up files directly inside `dir`.
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into().trim_end_matches('/').to_string(),
        }
    }
}

impl BaseLookup for ConventionLookup {
    fn name(&self) -> &'static str {
        "convention"
    }

    fn candidate(&self, base: &str, kind: AssetKind) -> Option<String> {
        Some(format!("{}/{}.{}", self.dir, base, kind.extension()))
    }
}

/// `<dir>/<default_prefix>-<kind>.<ext>`: the base's prefix segment replaced
/// by the canonical one, for themes that re-prefixed their class names but
/// still ship the default-prefixed files.
#[derive(Debug, Clone)]
pub struct FallbackPrefixLookup {
    dir: String,
    default_prefix: String,
}

impl FallbackPrefixLookup {
    /// Rewrite prefixes to `default_prefix` and look in `dir`.
    pub fn new(dir: impl Into<String>, default_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into().trim_end_matches('/').to_string(),
            default_prefix: default_prefix.into(),
        }
    }

    /// `base` with everything up to and including its first `-` replaced.
    ///
    /// Returns `None` when there is no prefix segment or the rewrite changes nothing.
    pub fn rewrite(&self, base: &str) -> Option<String> {
        let (prefix, rest) = base.split_once('-')?;
        if prefix.is_empty() || prefix == self.default_prefix {
            return None;
        }
        Some(format!("{}-{}", self.default_prefix, rest))
    }
}

impl BaseLookup for FallbackPrefixLookup {
    fn name(&self) -> &'static str {
        "fallback-prefix"
    }

    fn candidate(&self, base: &str, kind: AssetKind) -> Option<String> {
        self.rewrite(base)
            .map(|fallback| format!("{}/{}.{}", self.dir, fallback, kind.extension()))
    }
}

/// `foo.css` → `foo.min.css`. `None` if `rel` lacks the kind's extension or
/// is already minified.
pub fn minified_sibling(rel: &str, kind: AssetKind) -> Option<String> {
    let suffix = format!(".{}", kind.extension());
    let stem = rel.strip_suffix(&suffix)?;
    if stem.ends_with(".min") {
        return None;
    }
    Some(format!("{stem}.min{suffix}"))
}

/// Whether `rel` is itself a minified file.
pub fn is_minified(rel: &str, kind: AssetKind) -> bool {
    rel.ends_with(&format!(".min.{}", kind.extension()))
}

/// Pick the file to load for `rel`: the minified sibling when present,
/// otherwise `rel` itself. Returns the chosen path and its modification time,
/// or `None` when neither exists.
pub fn prefer_minified<S>(source: &S, rel: &str, kind: AssetKind) -> Option<(String, u64)>
where
    S: AssetSource + ?Sized,
{
    if let Some(min_rel) = minified_sibling(rel, kind)
        && let Some(mtime) = source.modified(&min_rel)
    {
        return Some((min_rel, mtime));
    }
    source.modified(rel).map(|mtime| (rel.to_string(), mtime))
}
