//! Composition grammar for atomic-design component trees.
//!
//! Every component falls into one [`Category`], derived from its identifier
//! alone:
//!
//! | Identifier | Category |
//! |---|---|
//! | `ns/atom-*` | [`Category::Atomic`] |
//! | `ns/molecule-*` | [`Category::Composite`] |
//! | `ns/organism-*` | [`Category::Compound`] |
//! | `core/html` | [`Category::RawHtml`] |
//! | anything else | [`Category::Other`] |
//!
//! The grammar:
//!
//! 1. Atoms have no children
//! 2. Molecules contain only atoms
//! 3. Organisms contain only molecules and atoms
//! 4. Raw HTML components are not allowed anywhere
//!
//! [`validate_tree`] checks a tree and returns every breach in document order;
//! [`validate_composition`] is the save-time wrapper that parses stored content
//! and persists a [`CompositionReport`].

mod report;
mod validator;

pub use report::{CompositionReport, load_report, validate_composition};
pub use validator::{CompositionValidator, Rule, Severity, Violation, validate_tree};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the raw HTML escape-hatch component.
pub const RAW_HTML_COMPONENT: &str = "core/html";

/// Grammar category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Smallest building block; never has children
    Atomic,
    /// Built from atoms
    Composite,
    /// Built from composites and atoms
    Compound,
    /// Unstructured HTML
    RawHtml,
    /// Built-in or foreign components outside the grammar
    Other,
}

impl Category {
    /// Classify a component identifier.
    ///
    /// ```rust
    /// use blockwright::composition::Category;
    ///
    /// assert_eq!(Category::of("img2html/atom-button"), Category::Atomic);
    /// assert_eq!(Category::of("acme/molecule-card"), Category::Composite);
    /// assert_eq!(Category::of("img2html/organism-hero"), Category::Compound);
    /// assert_eq!(Category::of("core/html"), Category::RawHtml);
    /// assert_eq!(Category::of("core/group"), Category::Other);
    /// ```
    pub fn of(name: &str) -> Self {
        if name == RAW_HTML_COMPONENT {
            return Self::RawHtml;
        }

        let Some((_, kind)) = name.split_once('/') else {
            return Self::Other;
        };

        if kind.starts_with("atom-") {
            Self::Atomic
        } else if kind.starts_with("molecule-") {
            Self::Composite
        } else if kind.starts_with("organism-") {
            Self::Compound
        } else {
            Self::Other
        }
    }

    /// Whether a component of this category may appear as a direct child of `parent`.
    pub fn allowed_in(self, parent: Self) -> bool {
        match parent {
            Self::Composite => self == Self::Atomic,
            Self::Compound => matches!(self, Self::Atomic | Self::Composite),
            Self::Atomic | Self::RawHtml | Self::Other => true,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Atomic => "atom",
            Self::Composite => "molecule",
            Self::Compound => "organism",
            Self::RawHtml => "raw html",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}
