//! Published page corpus.
//!
//! Mining reads the stored content of published pages through [`PageCorpus`].
//! [`DirectoryCorpus`] serves pages from `*.html` files on disk; a slice of
//! [`Page`]s is a corpus too.

mod directory;

pub use directory::DirectoryCorpus;

use crate::core::BlockwrightError;
use serde::{Deserialize, Serialize};

/// One stored page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Stable page identifier
    pub id: String,
    /// Serialized block markup
    pub content: String,
}

impl Page {
    /// A page with the given identifier and content.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Source of published pages.
pub trait PageCorpus {
    /// At most `limit` pages, in a stable order.
    fn pages(&self, limit: usize) -> Result<Vec<Page>, BlockwrightError>;
}

impl PageCorpus for [Page] {
    fn pages(&self, limit: usize) -> Result<Vec<Page>, BlockwrightError> {
        Ok(self.iter().take(limit).cloned().collect())
    }
}

impl PageCorpus for Vec<Page> {
    fn pages(&self, limit: usize) -> Result<Vec<Page>, BlockwrightError> {
        self.as_slice().pages(limit)
    }
}
