use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Outcome of a best-effort removal.
#[derive(Debug, Default, Clone)]
pub struct RemovalReport {
    /// Number of filesystem objects removed (files, links and directories)
    pub removed: usize,
    /// Paths that could not be removed, with the reason
    pub failures: Vec<(PathBuf, String)>,
}

impl RemovalReport {
    /// True when nothing failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: &Path, reason: impl ToString) {
        self.failures.push((path.to_path_buf(), reason.to_string()));
    }
}

/// Remove a directory tree, continuing past anything that cannot be removed.
///
/// Children are removed before their parent. Symlinks are removed, never
/// followed. A directory whose children could not all be removed is reported
/// as a failure too (it is still non-empty).
pub fn remove_tree(path: &Path) -> RemovalReport {
    let mut report = RemovalReport::default();

    for item in WalkDir::new(path).follow_links(false).contents_first(true) {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                let failed = e.path().map(Path::to_path_buf).unwrap_or_else(|| path.to_path_buf());
                report.fail(&failed, e);
                continue;
            }
        };

        let result = if item.file_type().is_dir() {
            fs::remove_dir(item.path())
        } else {
            fs::remove_file(item.path())
        };

        match result {
            Ok(()) => report.removed += 1,
            Err(e) => report.fail(item.path(), e),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_tree_removes_nested_content() {
        let root = TempDir::new().unwrap();
        let tree = root.path().join("tree");
        fs::create_dir_all(tree.join("a/b")).unwrap();
        fs::write(tree.join("a/b/file"), b"data").unwrap();
        fs::write(tree.join("top"), b"data").unwrap();

        let report = remove_tree(&tree);
        assert!(report.is_complete(), "{:?}", report.failures);
        assert_eq!(report.removed, 5);
        assert!(!tree.exists());
    }

    #[test]
    fn test_remove_missing_tree_reports_failure() {
        let root = TempDir::new().unwrap();
        let report = remove_tree(&root.path().join("gone"));
        assert!(!report.is_complete());
        assert_eq!(report.removed, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_tree_is_not_followed() {
        let root = TempDir::new().unwrap();
        let target = root.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"").unwrap();
        let tree = root.path().join("tree");
        fs::create_dir(&tree).unwrap();
        std::os::unix::fs::symlink(&target, tree.join("link")).unwrap();

        let report = remove_tree(&tree);
        assert!(report.is_complete(), "{:?}", report.failures);
        assert!(!tree.exists());
        assert!(target.join("keep").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unremovable_child_does_not_stop_the_walk() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let tree = root.path().join("tree");
        let locked = tree.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("stuck"), b"").unwrap();
        fs::write(tree.join("free"), b"").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Running as root ignores directory permissions; nothing to observe then
        let probe = locked.join(".probe");
        if fs::write(&probe, b"").is_ok() {
            let _ = fs::remove_file(&probe);
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let report = remove_tree(&tree);
        assert!(!report.is_complete());
        assert!(!tree.join("free").exists());
        assert!(locked.join("stuck").exists());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
