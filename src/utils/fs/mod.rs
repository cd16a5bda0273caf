//! File system utilities shared by the engine components.
//!
//! Everything the engine writes to disk goes through this module:
//!
//! - **Atomic writes**: reports and docs are written to a temp file and renamed
//!   into place, so readers never observe a partial file
//! - **Exclusive creates**: mined templates are created with create-if-absent
//!   semantics, so two concurrent first runs cannot both claim the same slug
//! - **Metadata**: modification times used as cache-busting asset versions
//!
//! # Examples
//!
//! ```rust,no_run
//! use blockwright::utils::fs::{ensure_dir, safe_write, create_new, CreateOutcome};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("patterns"))?;
//! safe_write(Path::new("docs/COMPOSE.md"), "# Compose")?;
//!
//! match create_new(Path::new("patterns/auto-seq-a.html"), "<p>a</p>")? {
//!     CreateOutcome::Created => println!("written"),
//!     CreateOutcome::AlreadyExists => println!("kept existing"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod metadata;

pub use atomic::{CreateOutcome, atomic_write, create_new, safe_write};
pub use dirs::{ensure_dir, ensure_parent_dir};
pub use metadata::{get_modified_time, modified_secs};
