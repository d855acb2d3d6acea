//! Filesystem listing

use std::fs;
use std::io;
use std::path::Path;

use super::entry::Entry;

/// Read directory contents, ordered by name.
///
/// Entries that vanish or cannot be stat'ed between `read_dir` and the
/// per-entry lookup are skipped; only failing to open `path` is an error.
/// Hidden entries are kept.
pub fn read_directory(path: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(path)? {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(dir = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        match Entry::from_path(&dir_entry.path()) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::debug!(entry = %dir_entry.path().display(), error = %e, "entry vanished during listing");
            }
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_listing_is_name_ordered_and_keeps_hidden() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("b.txt"), b"").unwrap();
        fs::create_dir(root.path().join("a_dir")).unwrap();
        fs::write(root.path().join(".env"), b"").unwrap();
        fs::write(root.path().join("C.md"), b"").unwrap();

        let entries = read_directory(root.path()).unwrap();
        assert_eq!(names(&entries), vec![".env", "C.md", "a_dir", "b.txt"]);
        assert!(entries[2].is_dir);
        assert!(entries[0].is_hidden);
    }

    #[test]
    fn test_empty_directory() {
        let root = TempDir::new().unwrap();
        assert!(read_directory(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let root = TempDir::new().unwrap();
        assert!(read_directory(&root.path().join("missing")).is_err());
    }

    #[test]
    fn test_listing_a_file_is_error() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("f");
        fs::write(&file, b"").unwrap();
        assert!(read_directory(&file).is_err());
    }
}
