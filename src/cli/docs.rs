//! `blockwright docs`: regenerate the composition documentation.

use super::CommandContext;
use crate::docs::DocsGenerator;
use crate::mining::{Authorization, TemplateStore};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Arguments of `blockwright docs`.
#[derive(Args, Debug)]
pub struct DocsCommand {
    /// Output directory (defaults to the configured docs directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

impl DocsCommand {
    /// Write the guides and list them.
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let out_dir = self.out.unwrap_or_else(|| context.path(&context.config.docs_dir));
        let generator = DocsGenerator::new(
            out_dir,
            TemplateStore::new(context.path(&context.config.patterns_dir)),
            context.config.pattern_category(),
        );

        let outcome = generator.generate(&context.store(), Authorization::Granted)?;
        for path in &outcome.written {
            println!("{} {}", "✓".green(), path.display());
        }
        Ok(())
    }
}
