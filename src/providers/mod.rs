//! Filesystem providers backing a directory view
//!
//! The directory state never touches `std::fs` directly; it goes through a
//! provider so the listing, metadata and removal collaborators can be
//! swapped (tests use a local provider over a temporary directory).

mod local;

pub use local::LocalProvider;

use std::path::Path;

use crate::errors::AppResult;
use crate::fs::{Entry, RemovalReport};

/// Trait for directory-view filesystem providers
pub trait Provider: Send {
    /// Short provider name for display
    fn name(&self) -> &str;

    /// List directory contents in display order. Per-entry failures are
    /// skipped; only an unreadable `path` is an error.
    fn list_directory(&self, path: &Path) -> AppResult<Vec<Entry>>;

    /// Size of a file in bytes
    fn stat_size(&self, path: &Path) -> AppResult<u64>;

    /// Number of immediate children of a directory
    fn count_children(&self, path: &Path) -> AppResult<usize>;

    /// Remove a single file or symlink
    fn remove_file(&self, path: &Path) -> AppResult<()>;

    /// Remove a directory tree, best-effort
    fn remove_dir_recursive(&self, path: &Path) -> RemovalReport;

    /// Whether `path` itself is a directory; a symlink to a directory is not
    fn is_plain_dir(&self, path: &Path) -> bool;
}
