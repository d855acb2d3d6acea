//! Local filesystem provider

use std::fs;
use std::path::Path;

use super::Provider;
use crate::errors::{AppError, AppResult};
use crate::fs::{Entry, RemovalReport, metadata, utils};

/// Provider for local filesystem operations
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProvider;

impl LocalProvider {
    /// Create a new local provider
    pub fn new() -> Self {
        Self
    }
}

impl Provider for LocalProvider {
    fn name(&self) -> &str {
        "Local"
    }

    fn list_directory(&self, path: &Path) -> AppResult<Vec<Entry>> {
        if !path.is_dir() {
            return Err(AppError::NotADirectory(path.to_path_buf()));
        }
        Ok(crate::fs::read_directory(path)?)
    }

    fn stat_size(&self, path: &Path) -> AppResult<u64> {
        Ok(metadata::stat_size(path)?)
    }

    fn count_children(&self, path: &Path) -> AppResult<usize> {
        Ok(metadata::count_children(path)?)
    }

    fn remove_file(&self, path: &Path) -> AppResult<()> {
        Ok(fs::remove_file(path)?)
    }

    fn remove_dir_recursive(&self, path: &Path) -> RemovalReport {
        utils::remove_tree(path)
    }

    fn is_plain_dir(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }
}
