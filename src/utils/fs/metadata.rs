//! File metadata queries.
//!
//! Asset versions fall back to the file's modification time, expressed as whole
//! seconds since the Unix epoch (the same value a `filemtime` cache-buster would use).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Gets the modification time of a file.
///
/// # Errors
/// Returns an error if the file metadata cannot be read
pub fn get_modified_time(path: &Path) -> Result<SystemTime> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

    metadata
        .modified()
        .with_context(|| format!("Failed to get modification time for: {}", path.display()))
}

/// Modification time of a file in seconds since the Unix epoch.
///
/// Returns `None` when the file is missing or its timestamp is unavailable;
/// callers treat that exactly like a missing file.
pub fn modified_secs(path: &Path) -> Option<u64> {
    let modified = get_modified_time(path).ok()?;
    modified.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}
