//! Generated composition documentation.
//!
//! Two Markdown files are produced in the docs directory:
//!
//! - `COMPOSE.md`: frequent sequences and groups from the last [`MiningReport`]
//! - `PATTERNS_GUIDE.md`: every template in the patterns directory with its
//!   registration slug
//!
//! Both are rendered with Tera and overwritten atomically on every run.

use crate::core::BlockwrightError;
use crate::mining::{Authorization, MiningReport, TemplateStore};
use crate::store::OptionStore;
use crate::utils::fs::safe_write;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tera::{Context as TeraContext, Tera};
use tracing::{debug, info, warn};

/// File name of the composition guide.
pub const COMPOSE_FILE: &str = "COMPOSE.md";

/// File name of the patterns guide.
pub const PATTERNS_GUIDE_FILE: &str = "PATTERNS_GUIDE.md";

const COMPOSE_TEMPLATE: &str = r"# Combining Components
{% if sequences %}
## Frequent sequences
{% for item in sequences %}
- {{ item.signature }} ({{ item.count }})
{%- endfor %}
{% endif %}{% if groups %}
## Frequent groups
{% for item in groups %}
- {{ item.signature }} ({{ item.count }})
{%- endfor %}
{% endif %}";

const PATTERNS_TEMPLATE: &str = r"# Patterns Guide
{% for pattern in patterns %}
## {{ pattern.title }}
- Slug: `{{ pattern.name }}`
- Usage: insert it from the Patterns panel of the site editor
{% endfor %}";

#[derive(Debug, Serialize)]
struct PatternEntry {
    title: String,
    name: String,
}

/// Files written by a documentation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocsOutcome {
    /// Written files, in generation order
    pub written: Vec<PathBuf>,
}

/// Renders the documentation files for one theme.
#[derive(Debug, Clone)]
pub struct DocsGenerator {
    out_dir: PathBuf,
    templates: TemplateStore,
    category: String,
}

impl DocsGenerator {
    /// Write into `out_dir`, listing templates from `templates` under `category`.
    pub fn new(out_dir: impl Into<PathBuf>, templates: TemplateStore, category: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            templates,
            category: category.into(),
        }
    }

    /// Output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render and write both guides.
    ///
    /// A missing or unreadable mining report produces a composition guide with
    /// only its heading.
    ///
    /// # Errors
    ///
    /// Rendering or writing a file failed.
    pub fn generate(&self, store: &dyn OptionStore, authorization: Authorization) -> Result<DocsOutcome> {
        if !authorization.is_granted() {
            debug!("Documentation generation denied");
            return Ok(DocsOutcome::default());
        }

        let report = MiningReport::load(store).unwrap_or_else(|e| {
            warn!("Ignoring unreadable mining report: {}", e);
            None
        });

        let mut outcome = DocsOutcome::default();
        outcome.written.push(self.write(COMPOSE_FILE, &self.compose_markdown(report.as_ref())?)?);
        outcome.written.push(self.write(PATTERNS_GUIDE_FILE, &self.patterns_markdown()?)?);

        info!("Wrote {} documentation files to {}", outcome.written.len(), self.out_dir.display());
        Ok(outcome)
    }

    /// `COMPOSE.md` content for `report`.
    pub fn compose_markdown(&self, report: Option<&MiningReport>) -> Result<String> {
        let mut context = TeraContext::new();
        context.insert("sequences", &report.map(|r| r.sequence_counts.as_slice()).unwrap_or_default());
        context.insert("groups", &report.map(|r| r.group_counts.as_slice()).unwrap_or_default());
        render(COMPOSE_TEMPLATE, &context)
    }

    /// `PATTERNS_GUIDE.md` content for the current patterns directory.
    pub fn patterns_markdown(&self) -> Result<String> {
        let patterns: Vec<PatternEntry> = self
            .templates
            .list()
            .into_iter()
            .map(|file| PatternEntry {
                title: title_case(&file.slug),
                name: format!("{}/{}", self.category, file.slug.to_lowercase()),
            })
            .collect();

        let mut context = TeraContext::new();
        context.insert("patterns", &patterns);
        render(PATTERNS_TEMPLATE, &context)
    }

    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.out_dir.join(file_name);
        safe_write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

fn render(template: &str, context: &TeraContext) -> Result<String> {
    let mut tera = Tera::default();
    tera.render_str(template, context).map_err(|e| {
        BlockwrightError::Other {
            message: format!("Documentation template failed to render: {e}"),
        }
        .into()
    })
}

fn title_case(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
