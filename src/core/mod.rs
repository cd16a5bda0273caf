//! Core types shared by every blockwright module.
//!
//! At the moment this is the error taxonomy: [`BlockwrightError`] for typed
//! failures, [`ErrorContext`] for CLI presentation, and [`user_friendly_error`]
//! to turn an arbitrary `anyhow` chain into something an operator can act on.

pub mod error;

pub use error::{BlockwrightError, ErrorContext, user_friendly_error};
