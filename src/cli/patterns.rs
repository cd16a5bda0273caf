//! `blockwright patterns`: mine templates and inspect the frequency report.

use super::{CommandContext, OutputFormat, print_json};
use crate::mining::{Authorization, MiningOutcome, MiningReport, SignatureCount};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

/// Arguments of `blockwright patterns`.
#[derive(Args, Debug)]
pub struct PatternsCommand {
    #[command(subcommand)]
    action: PatternsAction,
}

#[derive(Subcommand, Debug)]
enum PatternsAction {
    /// Scan published pages and write templates for frequent structures
    Generate {
        /// Use the extended window (4 components by default)
        #[arg(long)]
        len4: bool,

        /// Override the minimum occurrence count
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        min_support: Option<u64>,
    },

    /// Show the last persisted frequency report
    Report {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl PatternsCommand {
    /// Run the selected action.
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        match self.action {
            PatternsAction::Generate { len4, min_support } => generate(context, len4, min_support).await,
            PatternsAction::Report { format } => report(context, format),
        }
    }
}

async fn generate(context: &CommandContext, len4: bool, min_support: Option<u64>) -> Result<()> {
    let mut context = context.clone();
    if let Some(min_support) = min_support {
        context.config.mining.min_support = usize::try_from(min_support)?;
    }
    let window = if len4 {
        context.config.mining.extended_window
    } else {
        context.config.mining.window
    };

    // The scan is synchronous file work
    let outcome = tokio::task::spawn_blocking(move || {
        context
            .miner()
            .generate(&context.corpus(), &context.store(), Authorization::Granted, window)
    })
    .await
    .context("Pattern generation task failed")?;

    print_outcome(&outcome, window);
    Ok(())
}

fn print_outcome(outcome: &MiningOutcome, window: usize) {
    println!(
        "{} Pattern generation (window {}): {} created, {} skipped",
        "✓".green(),
        window,
        outcome.created.to_string().bold(),
        outcome.skipped
    );
    for template in &outcome.templates {
        println!("  + {} {}", template.slug, format!("({})", template.title).dimmed());
    }
    if outcome.failed > 0 {
        println!(
            "{} {} templates could not be written",
            "⚠".yellow(),
            outcome.failed.to_string().yellow()
        );
    }
}

fn report(context: &CommandContext, format: OutputFormat) -> Result<()> {
    let report = MiningReport::load(&context.store())?;

    match (format, report) {
        (OutputFormat::Json, report) => print_json(&report),
        (OutputFormat::Text, None) => {
            println!("No mining report yet. Run `blockwright patterns generate` first.");
            Ok(())
        }
        (OutputFormat::Text, Some(report)) => {
            println!(
                "Mining report from {} (window {})",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.window_size
            );
            print_counts("Frequent sequences", &report.sequence_counts);
            print_counts("Frequent groups", &report.group_counts);
            Ok(())
        }
    }
}

fn print_counts(title: &str, counts: &[SignatureCount]) {
    println!("\n{}", title.bold());
    if counts.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for entry in counts {
        println!("  {:>5}  {}", entry.count, entry.signature);
    }
}
