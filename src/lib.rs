//! blockwright - component resolution and composition governance for block themes
//!
//! A block theme builds pages from typed, nested components stored as
//! comment-delimited block markup. blockwright is the engine around those
//! components:
//!
//! - **Asset resolution**: decide at render time exactly which stylesheets and
//!   scripts a page needs, from the component manifest and from the class names
//!   that actually appear in the rendered markup, loading each shared component
//!   at most once per request
//! - **Composition governance**: enforce the atom / molecule / organism nesting
//!   grammar and persist a violation report for every saved page
//! - **Pattern mining**: count recurring component sequences and container
//!   groupings across published pages and materialize the frequent ones as
//!   reusable templates
//!
//! # Architecture Overview
//!
//! Everything runs inside one synchronous request or admin action. Mutable
//! state is explicit: the per-request [`assets::EnqueuedAssetSet`] is owned by
//! the caller, and mining counters live only for the duration of one run.
//! Storage is injected through [`store::OptionStore`] and
//! [`assets::AssetSource`].
//!
//! None of the engine operations fail their caller. Missing or malformed input
//! degrades to an empty result and is logged through `tracing`.
//!
//! # Core Modules
//!
//! - [`tree`] - Parsed component trees, the block-markup parser and tree walking
//! - [`manifest`] - Component manifest (declared styles and scripts per component)
//! - [`assets`] - Asset resolver, lookup strategies and the per-request dedup set
//! - [`composition`] - Component categories, grammar validation and page reports
//! - [`mining`] - Signature counting, template materialization and the mining report
//!
//! # Supporting Modules
//!
//! - [`store`] - Key-value persistence for reports
//! - [`corpus`] - Published page sources
//! - [`docs`] - Generated composition documentation
//! - [`config`] - `blockwright.toml` configuration
//! - [`core`] - Error types and user-facing error context
//! - [`utils`] - File system helpers
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```rust
//! use blockwright::composition::{Rule, validate_tree};
//! use blockwright::tree::parse_document;
//!
//! let page = r#"<!-- wp:img2html/molecule-card -->
//! <div class="img2html-card"><!-- wp:img2html/organism-hero /--></div>
//! <!-- /wp:img2html/molecule-card -->"#;
//!
//! let violations = validate_tree(&parse_document(page)?);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].rule, Rule::MoleculeChildrenAtomsOnly);
//! # Ok::<(), blockwright::core::BlockwrightError>(())
//! ```

// Engine
pub mod assets;
pub mod composition;
pub mod manifest;
pub mod mining;
pub mod tree;

// Supporting modules
pub mod cli;
pub mod config;
pub mod core;
pub mod corpus;
pub mod docs;
pub mod store;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
