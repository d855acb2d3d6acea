//! Per-entry display facts (child counts and sizes)

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::entry::Entry;
use crate::providers::Provider;

/// Metadata column value for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMetadata {
    /// Number of immediate children of a directory
    Children(usize),
    /// Size of a file in bytes
    Size(u64),
    /// Target vanished or could not be read; rendered as "?"
    Unknown,
}

impl EntryMetadata {
    /// Compute the metadata for an entry. Never fails: a target that went
    /// away after listing yields `Unknown`.
    pub fn for_entry(entry: &Entry, provider: &dyn Provider) -> Self {
        let result = if entry.is_dir {
            provider.count_children(&entry.path).map(EntryMetadata::Children)
        } else {
            provider.stat_size(&entry.path).map(EntryMetadata::Size)
        };
        result.unwrap_or_else(|e| {
            tracing::trace!(entry = %entry.path.display(), error = %e, "metadata unavailable");
            EntryMetadata::Unknown
        })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, EntryMetadata::Unknown)
    }
}

impl fmt::Display for EntryMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryMetadata::Children(n) => write!(f, "{}", n),
            EntryMetadata::Size(bytes) => f.write_str(&format_size(*bytes)),
            EntryMetadata::Unknown => f.write_str("?"),
        }
    }
}

/// Size of a file (follows symlinks)
pub fn stat_size(path: &Path) -> io::Result<u64> {
    Ok(fs::metadata(path)?.len())
}

/// Number of immediate children of a directory, hidden ones included
pub fn count_children(path: &Path) -> io::Result<usize> {
    Ok(fs::read_dir(path)?.filter_map(Result::ok).count())
}

/// Format a file size for display (short version for the metadata column)
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1}T", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}
