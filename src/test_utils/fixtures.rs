//! Theme directory fixtures.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A temporary theme directory laid out with the default configuration paths.
pub struct ThemeFixture {
    dir: TempDir,
}

impl ThemeFixture {
    /// An empty theme.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("Failed to create theme directory")?,
        })
    }

    /// Theme root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a theme-relative path.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write a file and set its modification time to `secs` after the epoch.
    pub fn write_with_mtime(&self, rel: &str, content: &str, secs: u64) -> Result<PathBuf> {
        let path = self.write(rel, content)?;
        File::options()
            .write(true)
            .open(&path)?
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))?;
        Ok(path)
    }

    /// Write `blocks-manifest.json`.
    pub fn manifest(&self, json: &str) -> Result<PathBuf> {
        self.write("blocks-manifest.json", json)
    }

    /// Write `blockwright.toml`.
    pub fn config(&self, toml: &str) -> Result<PathBuf> {
        self.write("blockwright.toml", toml)
    }

    /// Publish a page as `content/<id>.html`.
    pub fn page(&self, id: &str, content: &str) -> Result<PathBuf> {
        self.write(&format!("content/{id}.html"), content)
    }
}

/// Block markup snippets for building pages.
pub struct PageFixture;

impl PageFixture {
    /// A void component.
    pub fn void(name: &str) -> String {
        format!("<!-- wp:{name} /-->")
    }

    /// A component wrapping `inner` in a div with `class`.
    pub fn wrapped(name: &str, class: &str, inner: &str) -> String {
        format!(
            "<!-- wp:{name} {{\"className\":\"{class}\"}} -->\n<div class=\"{class}\">{inner}</div>\n<!-- /wp:{name} -->"
        )
    }

    /// Root-level components separated by blank lines.
    pub fn page(blocks: &[String]) -> String {
        blocks.join("\n\n")
    }
}
