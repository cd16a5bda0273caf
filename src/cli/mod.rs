//! Command-line interface for blockwright.
//!
//! Each command lives in its own module with its own argument struct and an
//! async `execute` method, and is dispatched from [`Cli::execute`].
//!
//! # Available Commands
//!
//! - `assets` - Show which stylesheets and scripts a context would load
//! - `validate` - Check a page against the composition grammar and store the report
//! - `patterns` - Mine the page corpus for templates, or show the last report
//! - `docs` - Regenerate the composition and patterns guides
//!
//! # Usage
//!
//! ```bash
//! # Everything the editor loads
//! blockwright --theme ./my-theme assets editor
//!
//! # Validate a stored page
//! blockwright validate content/home.html
//!
//! # Mine templates with 4-component windows
//! blockwright patterns generate --len4
//!
//! # Rebuild the docs
//! blockwright docs
//! ```
//!
//! Every command runs as the theme administrator.

pub mod assets;
pub mod docs;
pub mod patterns;
pub mod validate;

use crate::assets::{AssetResolver, ResolverSettings, ThemeFiles};
use crate::config::EngineConfig;
use crate::corpus::DirectoryCorpus;
use crate::manifest::ComponentManifest;
use crate::mining::PatternMiner;
use crate::store::JsonFileStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "blockwright",
    about = "Asset resolution, composition checks and pattern mining for block themes",
    version,
    long_about = "blockwright works on a block theme directory: it resolves component assets from the \
                  manifest and class names, validates atomic-design composition, and mines published \
                  pages for reusable patterns."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Theme root directory
    #[arg(long, global = true, default_value = ".")]
    theme: PathBuf,

    /// Configuration file (defaults to `<theme>/blockwright.toml`)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve component assets for a rendering context
    Assets(assets::AssetsCommand),

    /// Validate a page's composition and persist the report
    Validate(validate::ValidateCommand),

    /// Generate templates from frequent structures, or show the last report
    Patterns(patterns::PatternsCommand),

    /// Regenerate COMPOSE.md and PATTERNS_GUIDE.md
    Docs(docs::DocsCommand),
}

/// Output format for commands that print results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Theme location and configuration shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Theme root directory
    pub theme_root: PathBuf,
    /// Loaded configuration
    pub config: EngineConfig,
}

impl CommandContext {
    /// Load the configuration for `theme_root`.
    pub fn load(theme_root: &Path, config_path: Option<&Path>) -> Result<Self> {
        Ok(Self {
            theme_root: theme_root.to_path_buf(),
            config: EngineConfig::load_for_theme(theme_root, config_path)?,
        })
    }

    /// Theme-relative path resolved against the theme root.
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.theme_root.join(relative)
    }

    /// The component manifest, or `None` when it is missing or malformed.
    pub fn manifest(&self) -> Option<ComponentManifest> {
        ComponentManifest::load_optional(&self.path(&self.config.manifest))
    }

    /// Resolver over the theme's files.
    pub fn resolver(&self) -> AssetResolver {
        AssetResolver::new(
            ThemeFiles::new(&self.theme_root, &self.config.theme_uri),
            ResolverSettings::from(&self.config),
        )
    }

    /// Report store.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.path(&self.config.store_dir))
    }

    /// Published pages.
    pub fn corpus(&self) -> DirectoryCorpus {
        DirectoryCorpus::new(self.path(&self.config.pages_dir))
    }

    /// Pattern miner writing into the theme's patterns directory.
    pub fn miner(&self) -> PatternMiner {
        PatternMiner::from_config(&self.config, &self.theme_root)
    }
}

impl Cli {
    /// Set up logging, load the configuration and run the command.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let context = CommandContext::load(&self.theme, self.config.as_deref())?;
        tracing::debug!("Theme root: {}", context.theme_root.display());

        match self.command {
            Commands::Assets(cmd) => cmd.execute(&context).await,
            Commands::Validate(cmd) => cmd.execute(&context).await,
            Commands::Patterns(cmd) => cmd.execute(&context).await,
            Commands::Docs(cmd) => cmd.execute(&context).await,
        }
    }

    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
