//! `blockwright validate`: composition check of one stored page.
//!
//! The report is persisted under the page identifier, replacing any previous
//! report for the same page, and summarized on stdout. Violations are reported
//! as data; the command only fails when the page cannot be read.

use super::assets::read_page;
use super::{CommandContext, OutputFormat, print_json};
use crate::composition::{CompositionReport, validate_composition};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Violations shown in text output.
const SHOWN_VIOLATIONS: usize = 5;

/// Arguments of `blockwright validate`.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Stored page content
    page: PathBuf,

    /// Page identifier the report is stored under (defaults to the path under
    /// the content directory, or the file stem for pages outside it)
    #[arg(long)]
    page_id: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ValidateCommand {
    /// Validate, persist and print.
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let content = read_page(&self.page).await?;
        let page_id = self.page_id.clone().unwrap_or_else(|| default_page_id(&self.page, context));

        let report = validate_composition(&page_id, &content, &context.store());

        match self.format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Text => {
                print_report(&report);
                Ok(())
            }
        }
    }
}

/// Corpus identifier for pages under the content directory, file stem otherwise.
fn default_page_id(page: &Path, context: &CommandContext) -> String {
    let corpus = context.corpus();
    if page.starts_with(corpus.root()) {
        return corpus.page_id(page);
    }
    page.file_stem()
        .map_or_else(|| page.display().to_string(), |s| s.to_string_lossy().into_owned())
}

fn print_report(report: &CompositionReport) {
    if report.ok {
        println!("{} Composition valid for page {}", "✓".green(), report.page_id.bold());
        return;
    }

    println!(
        "{} {} composition violations in page {}",
        "✗".red(),
        report.count.to_string().red().bold(),
        report.page_id.bold()
    );
    for violation in report.head(SHOWN_VIOLATIONS) {
        let mut line = format!("  - {}: {}", violation.message, violation.block_name);
        if let Some(child) = &violation.child_name {
            line.push_str(&format!(" -> {child}"));
        }
        println!("{line}");
    }
    if report.count > SHOWN_VIOLATIONS {
        println!("  ... and {} more", report.count - SHOWN_VIOLATIONS);
    }
}
