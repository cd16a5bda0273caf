//! Test utilities for blockwright
//!
//! Shared by unit tests and the integration suite (enable the `test-utils`
//! feature for the latter):
//!
//! - [`init_test_logging`] installs a test-friendly tracing subscriber once
//! - [`ThemeFixture`] builds a throwaway theme directory with a manifest,
//!   component files and published pages

pub mod fixtures;

pub use fixtures::{PageFixture, ThemeFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays off.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// blockwright::test_utils::init_test_logging(None);
/// blockwright::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=blockwright=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
