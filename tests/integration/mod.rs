//! Integration test suite for blockwright
//!
//! End-to-end tests that build a throwaway theme on disk and drive the engine
//! through its public API and through the `blockwright` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **assets**: Asset resolution for editor, document and render contexts
//! - **composition**: Grammar validation and persisted reports
//! - **mining**: Corpus mining, template materialization and the report
//! - **cli**: Command-line behavior

mod assets;
mod cli;
mod composition;
mod mining;
