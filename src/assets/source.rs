//! Where asset files come from.
//!
//! The resolver never touches the file system directly; it asks an
//! [`AssetSource`] whether a theme-relative path exists, when it was last
//! modified, and what public URI it has. [`ThemeFiles`] is the on-disk
//! implementation.

use crate::utils::fs::modified_secs;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Read-only view of the theme's asset files, addressed by theme-relative path.
pub trait AssetSource {
    /// Modification time in seconds since the epoch, or `None` if `rel` does not exist.
    fn modified(&self, rel: &str) -> Option<u64>;

    /// Public URI of `rel`.
    fn uri(&self, rel: &str) -> String;

    /// Files directly inside directory `dir` with the given extension, as
    /// theme-relative paths in sorted order. A missing directory yields nothing.
    fn list(&self, dir: &str, extension: &str) -> Vec<String>;

    /// Whether `rel` exists.
    fn exists(&self, rel: &str) -> bool {
        self.modified(rel).is_some()
    }
}

/// Theme directory on disk, published under a base URI.
#[derive(Debug, Clone)]
pub struct ThemeFiles {
    root: PathBuf,
    base_uri: String,
}

impl ThemeFiles {
    /// A theme rooted at `root` and served from `base_uri`.
    pub fn new(root: impl Into<PathBuf>, base_uri: &str) -> Self {
        Self {
            root: root.into(),
            base_uri: base_uri.trim_end_matches('/').to_string(),
        }
    }

    /// Theme root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, rel: &str) -> PathBuf {
        self.root.join(rel.trim_start_matches('/'))
    }
}

impl AssetSource for ThemeFiles {
    fn modified(&self, rel: &str) -> Option<u64> {
        let path = self.absolute(rel);
        if !path.is_file() {
            trace!("Asset not found: {}", path.display());
            return None;
        }
        modified_secs(&path)
    }

    fn uri(&self, rel: &str) -> String {
        format!("{}/{}", self.base_uri, rel.trim_start_matches('/'))
    }

    fn list(&self, dir: &str, extension: &str) -> Vec<String> {
        let dir = dir.trim_matches('/');
        let base = self.absolute(dir);
        if !base.is_dir() {
            debug!("Components directory missing: {}", base.display());
            return Vec::new();
        }

        let pattern = format!("{}/*.{}", Pattern::escape(&base.to_string_lossy()), extension);
        let Ok(paths) = glob::glob(&pattern) else {
            return Vec::new();
        };

        let mut files: Vec<String> = paths
            .filter_map(std::result::Result::ok)
            .filter(|path| path.is_file())
            .filter_map(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .map(|name| format!("{dir}/{name}"))
            .collect();
        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_theme_files_lookup() {
        let temp = tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("assets/components")).unwrap();
        std::fs::write(temp.path().join("assets/components/img2html-card.css"), "").unwrap();

        let theme = ThemeFiles::new(temp.path(), "https://example.com/theme/");

        assert!(theme.exists("assets/components/img2html-card.css"));
        assert!(!theme.exists("assets/components/img2html-card.js"));
        assert!(!theme.exists("assets/components"));
        assert_eq!(
            theme.uri("assets/components/img2html-card.css"),
            "https://example.com/theme/assets/components/img2html-card.css"
        );
    }

    #[test]
    fn test_theme_files_list() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("assets/components");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("b.css"), "").unwrap();
        std::fs::write(dir.join("a.css"), "").unwrap();
        std::fs::write(dir.join("a.min.css"), "").unwrap();
        std::fs::write(dir.join("a.js"), "").unwrap();
        std::fs::write(dir.join("nested/c.css"), "").unwrap();

        let theme = ThemeFiles::new(temp.path(), "/t");
        assert_eq!(
            theme.list("assets/components", "css"),
            vec!["assets/components/a.css", "assets/components/a.min.css", "assets/components/b.css"]
        );
        assert_eq!(theme.list("assets/components", "js"), vec!["assets/components/a.js"]);
        assert!(theme.list("missing", "css").is_empty());
    }
}
