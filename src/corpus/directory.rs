//! Pages stored as files under a directory.

use super::{Page, PageCorpus};
use crate::core::BlockwrightError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const PAGE_EXTENSION: &str = "html";

/// Every `*.html` file below a directory is one page; its identifier is the
/// relative path without the extension, using `/` separators.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    root: PathBuf,
}

impl DirectoryCorpus {
    /// A corpus of the pages below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Corpus root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Identifier of the page stored at `path`: its path under the root,
    /// without extension and with `/` separators (`blog/first`).
    pub fn page_id(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path).with_extension("");
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn page_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable corpus entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| path.extension().is_some_and(|ext| ext == PAGE_EXTENSION))
            .collect();
        files.sort();
        files
    }
}

impl PageCorpus for DirectoryCorpus {
    fn pages(&self, limit: usize) -> Result<Vec<Page>, BlockwrightError> {
        if !self.root.is_dir() {
            return Err(BlockwrightError::PageReadError {
                path: self.root.display().to_string(),
                reason: "corpus directory does not exist".to_string(),
            });
        }

        let mut pages = Vec::new();
        for path in self.page_files() {
            if pages.len() == limit {
                debug!("Corpus limit of {} pages reached", limit);
                break;
            }
            match std::fs::read_to_string(&path) {
                Ok(content) => pages.push(Page::new(self.page_id(&path), content)),
                Err(e) => warn!("Skipping page {}: {}", path.display(), e),
            }
        }
        Ok(pages)
    }
}
