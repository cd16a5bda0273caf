//! Save-time validation and the persisted per-page report.

use super::{Violation, validate_tree};
use crate::core::BlockwrightError;
use crate::store::{OptionStore, composition_report_key, load_record, save_record};
use crate::tree::parse_document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of validating one page, overwritten on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionReport {
    /// Page the report belongs to
    pub page_id: String,
    /// Violations in document order
    pub violations: Vec<Violation>,
    /// `violations.len()`
    pub count: usize,
    /// `count == 0`
    pub ok: bool,
    /// When the page was checked
    pub checked_at: DateTime<Utc>,
}

impl CompositionReport {
    /// Build a report from a finished check.
    pub fn new(page_id: impl Into<String>, violations: Vec<Violation>) -> Self {
        let count = violations.len();
        Self {
            page_id: page_id.into(),
            violations,
            count,
            ok: count == 0,
            checked_at: Utc::now(),
        }
    }

    /// The first `limit` violations, for compact display.
    pub fn head(&self, limit: usize) -> &[Violation] {
        &self.violations[..self.violations.len().min(limit)]
    }
}

/// Validate stored page content and persist the report under the page's key.
///
/// Content that does not parse is treated as an empty page and passes. A failure
/// to persist is logged and the report is still returned.
pub fn validate_composition(page_id: &str, content: &str, store: &dyn OptionStore) -> CompositionReport {
    let nodes = parse_document(content).unwrap_or_else(|e| {
        debug!("Page {} has unparseable content, validating as empty: {}", page_id, e);
        Vec::new()
    });

    let report = CompositionReport::new(page_id, validate_tree(&nodes));
    debug!("Page {}: {} composition violations", page_id, report.count);

    if let Err(e) = save_record(store, &composition_report_key(page_id), &report) {
        warn!("Could not persist composition report for page {}: {}", page_id, e);
    }
    report
}

/// The last persisted report for `page_id`.
pub fn load_report(store: &dyn OptionStore, page_id: &str) -> Result<Option<CompositionReport>, BlockwrightError> {
    load_record(store, &composition_report_key(page_id))
}
