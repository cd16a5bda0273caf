//! Utility modules for blockwright
//!
//! - [`fs`] - Atomic writes, exclusive creates and file metadata

pub mod fs;

pub use fs::{atomic_write, create_new, ensure_dir, safe_write};
