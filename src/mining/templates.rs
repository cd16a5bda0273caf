//! Materialized template files.

use crate::utils::fs::{CreateOutcome, create_new};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extensions recognized as template files in the patterns directory.
pub const TEMPLATE_EXTENSIONS: [&str; 2] = ["html", "php"];

/// Description attached to every generated template.
pub const TEMPLATE_DESCRIPTION: &str = "Automatic pattern";

/// Registration record of a generated template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMeta {
    /// `<category>/<slug>`
    pub name: String,
    /// File stem
    pub slug: String,
    /// Display title
    pub title: String,
    /// Fixed description
    pub description: String,
    /// Registration categories
    pub categories: Vec<String>,
    /// Template markup as written
    pub content: String,
    /// Written file
    pub path: PathBuf,
}

/// A template found in the patterns directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// File stem
    pub slug: String,
    /// Full path
    pub path: PathBuf,
}

/// The patterns directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Templates live directly inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The patterns directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the generated template for `slug`.
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.html"))
    }

    /// Write a template unless one with this slug already exists.
    ///
    /// The existence check and the write are one exclusive-create operation, so
    /// concurrent runs never overwrite each other.
    ///
    /// # Errors
    ///
    /// Any write failure other than the file already existing.
    pub fn create(&self, slug: &str, content: &str) -> Result<CreateOutcome> {
        create_new(&self.path_for(slug), content)
    }

    /// Every template file in the directory, sorted by file name.
    pub fn list(&self) -> Vec<TemplateFile> {
        let mut files: Vec<TemplateFile> = TEMPLATE_EXTENSIONS
            .iter()
            .flat_map(|ext| {
                let pattern = format!("{}/*.{ext}", glob::Pattern::escape(&self.dir.to_string_lossy()));
                glob::glob(&pattern)
                    .into_iter()
                    .flatten()
                    .filter_map(std::result::Result::ok)
            })
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let slug = path.file_stem()?.to_string_lossy().into_owned();
                Some(TemplateFile { slug, path })
            })
            .collect();
        files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        files
    }
}
