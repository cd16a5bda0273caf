//! Error handling for blockwright
//!
//! The engine follows a strict degrade-don't-throw policy at its component
//! boundaries: asset resolution and composition validation run on every page
//! render or save and must never break page delivery. Errors therefore show up
//! in two places only:
//!
//! 1. **Inside the engine**, as [`BlockwrightError`] values that a component
//!    converts into a degraded result (and a `tracing` event) before returning.
//! 2. **At the CLI**, where operator mistakes (bad config, unreadable page file)
//!    are reported through [`ErrorContext`] with an actionable suggestion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use blockwright::core::{BlockwrightError, ErrorContext, user_friendly_error};
//!
//! let error = BlockwrightError::ConfigParseError {
//!     file: "blockwright.toml".to_string(),
//!     reason: "expected `=`".to_string(),
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The error type for blockwright operations.
///
/// Variants carry owned strings rather than source errors so that an error can be
/// cloned into an [`ErrorContext`] and logged without losing information.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockwrightError {
    /// The component manifest exists but could not be decoded as a mapping
    #[error("Invalid component manifest {file}: {reason}")]
    ManifestParseError {
        /// Manifest path
        file: String,
        /// Decoder message
        reason: String,
    },

    /// Stored page content does not follow the block-markup grammar
    #[error("Malformed block markup at byte {offset}: {reason}")]
    MarkupParseError {
        /// Byte offset into the page content
        offset: usize,
        /// What was expected at that position
        reason: String,
    },

    /// The engine configuration file is not valid TOML for [`crate::config::EngineConfig`]
    #[error("Invalid configuration {file}: {reason}")]
    ConfigParseError {
        /// Config path
        file: String,
        /// Decoder message
        reason: String,
    },

    /// Reading a persisted record failed
    #[error("Failed to read stored record '{key}': {reason}")]
    StoreReadError {
        /// Record key
        key: String,
        /// Underlying failure
        reason: String,
    },

    /// Writing a persisted record failed
    #[error("Failed to write stored record '{key}': {reason}")]
    StoreWriteError {
        /// Record key
        key: String,
        /// Underlying failure
        reason: String,
    },

    /// A mined template could not be written to the patterns directory
    #[error("Failed to write template '{slug}': {reason}")]
    TemplateWriteError {
        /// Template slug
        slug: String,
        /// Underlying failure
        reason: String,
    },

    /// A page file passed on the command line could not be read
    #[error("Failed to read page {path}: {reason}")]
    PageReadError {
        /// Page path
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Catch-all for failures that have no dedicated variant
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error wrapper that carries a user-facing suggestion and details.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: BlockwrightError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: BlockwrightError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// Known [`BlockwrightError`] variants get a tailored suggestion; I/O and TOML
/// errors are mapped onto the closest variant; anything else is wrapped as
/// [`BlockwrightError::Other`] with the full `anyhow` chain as its message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(known) = error.downcast_ref::<BlockwrightError>() {
        return create_error_context(known.clone());
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return create_error_context(BlockwrightError::ConfigParseError {
            file: "blockwright.toml".to_string(),
            reason: toml_error.to_string(),
        });
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::new(BlockwrightError::Other {
            message: format!("{error:#}"),
        })
        .with_suggestion("Check that the theme directory is writable by the current user");
    }

    ErrorContext::new(BlockwrightError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: BlockwrightError) -> ErrorContext {
    match &error {
        BlockwrightError::ConfigParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax in blockwright.toml. Verify quotes, brackets, and table names")
            .with_details("A missing blockwright.toml is fine (defaults apply); a present but malformed one is not"),

        BlockwrightError::ManifestParseError { .. } => ErrorContext::new(error)
            .with_suggestion("The manifest must be a mapping from component name to {style, script, ...}")
            .with_details("During rendering a malformed manifest silently disables manifest-driven loading"),

        BlockwrightError::PageReadError { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the page file exists and is UTF-8 encoded"),

        BlockwrightError::TemplateWriteError { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the patterns directory exists and is writable"),

        BlockwrightError::StoreWriteError { .. } | BlockwrightError::StoreReadError { .. } => {
            ErrorContext::new(error)
                .with_suggestion("Check permissions on the store directory (store_dir in blockwright.toml)")
        }

        _ => ErrorContext::new(error),
    }
}
