//! Pattern mining over the published page corpus.
//!
//! A mining run:
//!
//! 1. Reads up to `max_pages` pages and parses each one; pages that fail to
//!    parse are skipped
//! 2. Counts a `seq:` signature for every run of 2..=W consecutive root-level
//!    components, and a `grp:` signature for every root-level container
//! 3. Materializes every signature seen at least `min_support` times as a
//!    template file, unless a template with the same slug already exists
//! 4. Persists a [`MiningReport`] with the top signatures of each kind
//!
//! Only root-level runs and root-level containers are considered; nested
//! structure is not mined.
//!
//! Template writes use exclusive create, so a signature is materialized at most
//! once ever and repeated runs only add templates for new signatures.
//!
//! # Examples
//!
//! ```rust,no_run
//! use blockwright::config::EngineConfig;
//! use blockwright::corpus::DirectoryCorpus;
//! use blockwright::mining::{Authorization, PatternMiner};
//! use blockwright::store::JsonFileStore;
//!
//! let config = EngineConfig::default();
//! let miner = PatternMiner::from_config(&config, "/srv/theme".as_ref());
//! let outcome = miner.generate(
//!     &DirectoryCorpus::new("/srv/theme/content"),
//!     &JsonFileStore::new("/srv/theme/.blockwright"),
//!     Authorization::Granted,
//!     config.mining.window,
//! );
//! println!("created {} / skipped {}", outcome.created, outcome.skipped);
//! ```

pub mod signature;
pub mod templates;

pub use signature::{SignatureCounts, SignatureKind, group_signature, sequence_signature, slug_for, title_for};
pub use templates::{TemplateFile, TemplateMeta, TemplateStore};

use crate::config::{EngineConfig, MiningConfig};
use crate::core::BlockwrightError;
use crate::corpus::{Page, PageCorpus};
use crate::store::{MINING_REPORT_KEY, OptionStore, load_record, save_record};
use crate::tree::{ComponentNode, parse_document};
use crate::utils::fs::CreateOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Whether the caller may run administrative operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The caller holds the required privilege
    Granted,
    /// The caller does not; the operation has no effect
    Denied,
}

impl Authorization {
    /// Whether the operation may proceed.
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// One ranked report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureCount {
    /// Signature string
    pub signature: String,
    /// Occurrences in the scanned corpus
    pub count: usize,
}

/// Ranked frequency report, overwritten by every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningReport {
    /// Top sequence signatures, count descending
    pub sequence_counts: Vec<SignatureCount>,
    /// Top group signatures, count descending
    pub group_counts: Vec<SignatureCount>,
    /// Maximum window length used
    pub window_size: usize,
    /// When the run finished
    pub generated_at: DateTime<Utc>,
}

impl MiningReport {
    /// The last persisted report.
    pub fn load(store: &dyn OptionStore) -> Result<Option<Self>, BlockwrightError> {
        load_record(store, MINING_REPORT_KEY)
    }
}

/// Signature tables of one scan.
#[derive(Debug, Clone, Default)]
pub struct CorpusScan {
    /// `seq:` signatures
    pub sequences: SignatureCounts,
    /// `grp:` signatures
    pub groups: SignatureCounts,
    /// Pages that parsed
    pub pages_scanned: usize,
    /// Pages skipped because their content did not parse
    pub pages_skipped: usize,
}

impl CorpusScan {
    /// Count the signatures of every page.
    pub fn run(pages: &[Page], window: usize, container_types: &[String]) -> Self {
        let mut scan = Self::default();
        for page in pages {
            match parse_document(&page.content) {
                Ok(nodes) => {
                    scan.add_page(&page.content, &nodes, window, container_types);
                    scan.pages_scanned += 1;
                }
                Err(e) => {
                    debug!("Skipping page {}: {}", page.id, e);
                    scan.pages_skipped += 1;
                }
            }
        }
        scan
    }

    fn add_page(&mut self, content: &str, nodes: &[ComponentNode], window: usize, container_types: &[String]) {
        let roots: Vec<&ComponentNode> = nodes.iter().filter(|n| !n.is_raw()).collect();

        for start in 0..roots.len() {
            for len in 2..=window {
                let Some(slice) = roots.get(start..start + len) else {
                    break;
                };
                self.sequences
                    .record(sequence_signature(slice), || verbatim(content, slice));
            }
        }

        for container in roots.iter().filter(|n| container_types.contains(&n.name)) {
            self.groups
                .record(group_signature(container), || container.source_text(content).map(str::to_string));
        }
    }
}

/// Source text from the start of the first node to the end of the last.
fn verbatim(content: &str, slice: &[&ComponentNode]) -> Option<String> {
    let start = slice.first()?.span.as_ref()?.start;
    let end = slice.last()?.span.as_ref()?.end;
    content.get(start..end).map(str::to_string)
}

/// Result of a mining run.
#[derive(Debug, Clone, Default)]
pub struct MiningOutcome {
    /// Templates written by this run
    pub created: usize,
    /// Qualifying signatures whose template already existed
    pub skipped: usize,
    /// Qualifying signatures whose template could not be written
    pub failed: usize,
    /// Registration records of the templates written by this run
    pub templates: Vec<TemplateMeta>,
    /// The report persisted by this run
    pub report: Option<MiningReport>,
}

/// Mines the corpus and materializes frequent idioms as templates.
#[derive(Debug, Clone)]
pub struct PatternMiner {
    settings: MiningConfig,
    category: String,
    templates: TemplateStore,
}

impl PatternMiner {
    /// A miner writing templates into `templates` and registering them under `category`.
    pub fn new(settings: MiningConfig, category: impl Into<String>, templates: TemplateStore) -> Self {
        Self {
            settings,
            category: category.into(),
            templates,
        }
    }

    /// A miner for the theme at `theme_root`.
    pub fn from_config(config: &EngineConfig, theme_root: &Path) -> Self {
        Self::new(
            config.mining.clone(),
            config.pattern_category(),
            TemplateStore::new(theme_root.join(&config.patterns_dir)),
        )
    }

    /// Template directory.
    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Run a full mining pass with sequence windows up to `window`.
    ///
    /// Never fails: a corpus that cannot be read is mined as empty, a template
    /// that cannot be written is counted in [`MiningOutcome::failed`], and a
    /// report that cannot be stored is logged.
    pub fn generate(
        &self,
        corpus: &dyn PageCorpus,
        store: &dyn OptionStore,
        authorization: Authorization,
        window: usize,
    ) -> MiningOutcome {
        if !authorization.is_granted() {
            debug!("Pattern generation denied");
            return MiningOutcome::default();
        }

        let pages = corpus.pages(self.settings.max_pages).unwrap_or_else(|e| {
            warn!("Could not read page corpus: {}", e);
            Vec::new()
        });

        let scan = CorpusScan::run(&pages, window, &self.settings.container_types);
        info!(
            "Scanned {} pages ({} skipped): {} sequence and {} group signatures",
            scan.pages_scanned,
            scan.pages_skipped,
            scan.sequences.len(),
            scan.groups.len()
        );

        let mut outcome = MiningOutcome::default();
        self.materialize(&scan.sequences, SignatureKind::Sequence, &mut outcome);
        self.materialize(&scan.groups, SignatureKind::Group, &mut outcome);

        let report = self.report(&scan, window);
        if let Err(e) = save_record(store, MINING_REPORT_KEY, &report) {
            warn!("Could not persist mining report: {}", e);
        }
        outcome.report = Some(report);

        info!(
            "Pattern generation: {} created, {} skipped, {} failed",
            outcome.created, outcome.skipped, outcome.failed
        );
        outcome
    }

    fn materialize(&self, counts: &SignatureCounts, kind: SignatureKind, outcome: &mut MiningOutcome) {
        for (signature, entry) in counts.ranked() {
            if entry.count < self.settings.min_support {
                continue;
            }
            let Some(sample) = entry.sample.as_deref() else {
                debug!("No sample retained for {}", signature);
                continue;
            };

            let slug = slug_for(signature);
            let content = match kind {
                SignatureKind::Sequence => wrap_in_container(sample),
                SignatureKind::Group => sample.to_string(),
            };

            match self.templates.create(&slug, &content) {
                Ok(CreateOutcome::Created) => {
                    debug!("Created template {} ({} occurrences)", slug, entry.count);
                    outcome.created += 1;
                    outcome.templates.push(TemplateMeta {
                        name: format!("{}/{}", self.category, slug),
                        title: title_for(signature),
                        description: templates::TEMPLATE_DESCRIPTION.to_string(),
                        categories: vec![self.category.clone()],
                        path: self.templates.path_for(&slug),
                        slug,
                        content,
                    });
                }
                Ok(CreateOutcome::AlreadyExists) => outcome.skipped += 1,
                Err(e) => {
                    warn!("Could not write template {}: {:#}", slug, e);
                    outcome.failed += 1;
                }
            }
        }
    }

    fn report(&self, scan: &CorpusScan, window: usize) -> MiningReport {
        let top = |counts: &SignatureCounts| -> Vec<SignatureCount> {
            counts
                .ranked()
                .into_iter()
                .take(self.settings.top_n)
                .map(|(signature, entry)| SignatureCount {
                    signature: signature.to_string(),
                    count: entry.count,
                })
                .collect()
        };

        MiningReport {
            sequence_counts: top(&scan.sequences),
            group_counts: top(&scan.groups),
            window_size: window,
            generated_at: Utc::now(),
        }
    }
}

/// Wrap sequence markup in a constrained group container.
fn wrap_in_container(markup: &str) -> String {
    format!("<!-- wp:group {{\"layout\":{{\"type\":\"constrained\"}}}} -->\n{markup}\n<!-- /wp:group -->\n")
}
