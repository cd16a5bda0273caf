//! `blockwright assets`: preview asset resolution.
//!
//! ```bash
//! blockwright assets editor
//! blockwright assets document content/home.html --format json
//! blockwright assets render content/home.html
//! ```
//!
//! `render` simulates one request: the page is parsed and every component
//! instance is resolved in render order, children first, against one
//! request-scoped dedup set.

use super::{CommandContext, OutputFormat, print_json};
use crate::assets::{AssetKind, AssetOrigin, EnqueuedAssetSet, LoadInstruction, StoredMarkupRenderer};
use crate::core::BlockwrightError;
use crate::tree::parse_document;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Arguments of `blockwright assets`.
#[derive(Args, Debug)]
pub struct AssetsCommand {
    #[command(subcommand)]
    context: AssetContext,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum AssetContext {
    /// Every manifest entry and every shared component file
    Editor,

    /// Manifest assets of the components a stored page mentions
    Document {
        /// Stored page content
        page: PathBuf,
    },

    /// Simulate rendering a stored page
    Render {
        /// Stored page content
        page: PathBuf,
    },
}

impl AssetsCommand {
    /// Resolve and print.
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let manifest = context.manifest();
        if manifest.is_none() {
            warn!("No usable component manifest; nothing will be loaded");
        }
        let resolver = context.resolver();

        let instructions = match &self.context {
            AssetContext::Editor => resolver.resolve_for_editor_context(manifest.as_ref()),
            AssetContext::Document { page } => {
                let content = read_page(page).await?;
                resolver.resolve_for_document_context(manifest.as_ref(), &content)
            }
            AssetContext::Render { page } => {
                let content = read_page(page).await?;
                let nodes = parse_document(&content).unwrap_or_else(|e| {
                    warn!("Page does not parse, rendering nothing: {}", e);
                    Vec::new()
                });
                let mut enqueued = EnqueuedAssetSet::new();
                resolver.resolve_page(
                    &nodes,
                    manifest.as_ref(),
                    &StoredMarkupRenderer::new(&content),
                    &mut enqueued,
                )
            }
        };

        match self.format {
            OutputFormat::Json => print_json(&instructions),
            OutputFormat::Text => {
                print_instructions(&instructions);
                Ok(())
            }
        }
    }
}

pub(crate) async fn read_page(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        BlockwrightError::PageReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn print_instructions(instructions: &[LoadInstruction]) {
    if instructions.is_empty() {
        println!("{}", "No assets to load".dimmed());
        return;
    }

    for instruction in instructions {
        let kind = match instruction.kind {
            AssetKind::Style => "style ".cyan(),
            AssetKind::Script => "script".yellow(),
        };
        let origin = match &instruction.origin {
            AssetOrigin::Manifest { component } => component.clone(),
            AssetOrigin::SharedComponent { base } => format!("shared {base}"),
        };

        let mut hints = Vec::new();
        if instruction.in_footer {
            hints.push("footer");
        }
        if instruction.load_async {
            hints.push("async");
        }
        if instruction.load_deferred {
            hints.push("defer");
        }

        println!(
            "{} {} {} {}{}",
            kind,
            instruction.uri,
            format!("ver={}", instruction.version).dimmed(),
            format!("[{origin}]").dimmed(),
            if hints.is_empty() {
                String::new()
            } else {
                format!(" ({})", hints.join(", "))
            }
        );
    }
    println!("\n{} assets", instructions.len().to_string().bold());
}
