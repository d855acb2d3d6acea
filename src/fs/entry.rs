//! Directory entry representation

use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// A single file or directory as seen at listing time.
///
/// Equality and hashing use the path only: two snapshots of the same path are
/// the same entry even if its type changed in between.
#[derive(Clone, Debug)]
pub struct Entry {
    /// File/directory name (not full path)
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// Whether this is a directory (symlinks to directories count)
    pub is_dir: bool,
    /// Whether this is a symbolic link
    pub is_symlink: bool,
    /// Whether the name starts with '.'
    pub is_hidden: bool,
}

impl Entry {
    /// Create an Entry from a path
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let is_symlink = metadata.is_symlink();

        // For symlinks, a dangling target is treated as a plain file
        let is_dir = if is_symlink {
            fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            metadata.is_dir()
        };

        let is_hidden = name.starts_with('.');

        Ok(Self {
            name,
            path: path.to_path_buf(),
            is_dir,
            is_symlink,
            is_hidden,
        })
    }

    /// Display name, with a trailing '/' for directories
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
