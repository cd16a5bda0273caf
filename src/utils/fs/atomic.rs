//! Atomic file write operations.
//!
//! Two write primitives are provided:
//!
//! - [`atomic_write`] replaces a file's content using a temp-and-rename strategy, used
//!   for anything that is overwritten on every run (reports, docs).
//! - [`create_new`] writes a file only if nothing exists at the path yet, using the
//!   operating system's exclusive-create flag. This is the check-and-create primitive
//!   behind idempotent template materialization.

use crate::utils::fs::dirs::ensure_parent_dir;
use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::warn;

/// Result of an exclusive create attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The file did not exist and now holds the given content.
    Created,
    /// A file was already present; it was left untouched.
    AlreadyExists,
}

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`].
///
/// # Examples
///
/// ```rust,no_run
/// use blockwright::utils::fs::safe_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// safe_write(Path::new("docs/COMPOSE.md"), "# Compose\n")?;
/// # Ok(())
/// # }
/// ```
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Write content to a sibling temporary file (`.tmp` extension)
/// 2. Sync the temporary file to disk
/// 3. Rename the temporary file over the target path
///
/// Parent directories are created when missing.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path).with_context(|| {
            format!(
                "Failed to create temp file: {}\n\nCheck file permissions and that directory exists",
                temp_path.display()
            )
        })?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Creates `path` with `content` only if no file exists there yet.
///
/// Existence check and creation are a single `O_EXCL` open, so concurrent callers
/// racing on the same path see exactly one [`CreateOutcome::Created`]. A file whose
/// content could not be written is removed again, so a later call can retry.
///
/// # Errors
///
/// Any I/O failure other than "already exists" (read-only directory, missing
/// permissions, full disk) is returned as an error.
pub fn create_new(path: &Path, content: &str) -> Result<CreateOutcome> {
    create_new_with(path, |file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    })
}

fn create_new_with<F>(path: &Path, fill: F) -> Result<CreateOutcome>
where
    F: FnOnce(&mut fs::File) -> std::io::Result<()>,
{
    ensure_parent_dir(path)?;

    let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(CreateOutcome::AlreadyExists),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create file: {}", path.display()));
        }
    };

    if let Err(e) = fill(&mut file) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!("Could not remove partially written {}: {}", path.display(), cleanup);
        }
        return Err(e).with_context(|| format!("Failed to write file: {}", path.display()));
    }

    Ok(CreateOutcome::Created)
}
