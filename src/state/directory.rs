//! Directory view state: listing snapshot, cursor, filter and chosen set

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use super::events::{DirectoryEvent, Listeners};
use super::filter::Filter;
use crate::errors::{AppError, AppResult};
use crate::fs::Entry;
use crate::providers::{LocalProvider, Provider};

/// Result of deleting the chosen set
#[derive(Debug, Default, Clone)]
pub struct DeleteSummary {
    /// Chosen paths removed completely
    pub removed: usize,
    /// Chosen paths (or things below them) that could not be removed
    pub failed: Vec<(PathBuf, String)>,
}

impl DeleteSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line summary for a status bar
    pub fn message(&self) -> String {
        if self.failed.is_empty() {
            format!("Deleted {} item(s)", self.removed)
        } else {
            format!("Deleted {} item(s), {} failed", self.removed, self.failed.len())
        }
    }
}

/// State of a single directory view.
///
/// Owns the listing snapshot of `path`, the cursor over the entries visible
/// through the filter, and the chosen set used for batch deletion. The view
/// never switches directory on its own: it asks its container through a
/// `DirectoryChangeRequested` event, and the container answers with
/// [`DirectoryState::navigate_to`].
pub struct DirectoryState {
    /// Directory represented by the snapshot
    path: PathBuf,
    /// Listing snapshot, in display order
    entries: Vec<Entry>,
    /// Indices into `entries` that pass the filter
    visible: Vec<usize>,
    /// Index into `visible`; `None` iff nothing is visible
    cursor: Option<usize>,
    filter: Filter,
    /// Paths flagged for batch operations
    chosen: HashSet<PathBuf>,
    /// Error from the last listing attempt
    error: Option<String>,
    focused: bool,
    warning_shown: bool,
    /// Command used to open files
    editor: String,
    provider: Box<dyn Provider>,
    listeners: Listeners,
}

impl fmt::Debug for DirectoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryState")
            .field("path", &self.path)
            .field("entries", &self.entries.len())
            .field("visible", &self.visible.len())
            .field("cursor", &self.cursor)
            .field("filter", &self.filter.pattern())
            .field("chosen", &self.chosen.len())
            .finish()
    }
}

impl DirectoryState {
    /// Create a view of `path` on the local filesystem
    pub fn new(path: impl Into<PathBuf>, editor: impl Into<String>) -> AppResult<Self> {
        Self::with_provider(path, editor, Box::new(LocalProvider::new()))
    }

    /// Create a view of `path` backed by `provider`
    pub fn with_provider(
        path: impl Into<PathBuf>,
        editor: impl Into<String>,
        provider: Box<dyn Provider>,
    ) -> AppResult<Self> {
        let path = std::path::absolute(path.into())?;
        let entries = provider.list_directory(&path)?;
        tracing::debug!(provider = provider.name(), path = %path.display(), entries = entries.len(), "directory view created");
        let mut state = Self {
            path,
            entries,
            visible: Vec::new(),
            cursor: None,
            filter: Filter::default(),
            chosen: HashSet::new(),
            error: None,
            focused: false,
            warning_shown: false,
            editor: editor.into(),
            provider,
            listeners: Listeners::new(),
        };
        state.recompute_visible();
        state.cursor = state.clamp(0);
        Ok(state)
    }

    /// Register a listener for this view's events
    pub fn subscribe(&mut self, listener: impl FnMut(&DirectoryEvent) + Send + 'static) {
        self.listeners.subscribe(listener);
    }

    /// Emit the current highlight, e.g. right after subscribing
    pub fn announce_highlight(&mut self) {
        self.emit_highlight();
    }

    // ---- read access ----

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Visible entries, in display order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.visible.iter().map(|&idx| &self.entries[idx])
    }

    /// Whole listing snapshot, ignoring the filter
    pub fn all_entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Visible entry at a display index
    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.visible.get(index).and_then(|&idx| self.entries.get(idx))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The entry under the cursor
    pub fn highlighted(&self) -> Option<&Entry> {
        self.cursor.and_then(|c| self.entry_at(c))
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Byte ranges of the active filter's matches inside `name`
    pub fn filter_matches(&self, name: &str) -> Vec<Range<usize>> {
        self.filter.match_ranges(name)
    }

    pub fn chosen(&self) -> &HashSet<PathBuf> {
        &self.chosen
    }

    pub fn is_chosen(&self, path: &Path) -> bool {
        self.chosen.contains(path)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // ---- cursor ----

    /// Move the cursor down by one
    pub fn move_next(&mut self) {
        if let Some(cursor) = self.cursor {
            self.move_to(cursor + 1);
        }
    }

    /// Move the cursor up by one
    pub fn move_previous(&mut self) {
        if let Some(cursor) = self.cursor {
            self.move_to(cursor.saturating_sub(1));
        }
    }

    /// Move the cursor to the first entry
    pub fn move_first(&mut self) {
        self.move_to(0);
    }

    /// Move the cursor to the last entry
    pub fn move_last(&mut self) {
        self.move_to(self.visible.len().saturating_sub(1));
    }

    /// Put the cursor at `index` (clamped). Always announces the highlight,
    /// since after a refresh the same index can hold a different entry.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = self.clamp(index);
        self.emit_highlight();
    }

    /// Put the cursor on `path`, or on the first entry if it is not visible
    pub fn select_path(&mut self, path: &Path) {
        let index = self.position_of(path).unwrap_or(0);
        self.set_cursor(index);
    }

    // ---- filter ----

    /// Narrow the visible entries to names matching `pattern`.
    /// The listing itself is kept; the cursor goes back to the top.
    pub fn set_filter(&mut self, pattern: &str) {
        self.filter = Filter::new(pattern);
        self.recompute_visible();
        self.cursor = self.clamp(0);
        self.emit_highlight();
        self.update_filter_warning();
    }

    /// Drop the filter and the chosen set. The cursor stays on the
    /// highlighted entry when there is one.
    pub fn clear_filter(&mut self) {
        let highlighted = self.highlighted().map(|e| e.path.clone());
        self.reset_filter();
        self.cursor = highlighted
            .and_then(|p| self.position_of(&p))
            .or_else(|| self.clamp(0));

        self.chosen.clear();
        self.emit(DirectoryEvent::SecondarySelectionChanged(HashSet::new()));
        self.emit_highlight();
        self.update_filter_warning();
    }

    /// The view gained input focus
    pub fn focus(&mut self) {
        self.focused = true;
        self.update_filter_warning();
    }

    /// The view lost input focus
    pub fn blur(&mut self) {
        self.focused = false;
        self.update_filter_warning();
    }

    // ---- navigation ----

    /// Enter the highlighted entry: ask the container to switch to it if it
    /// is a directory, or ask for it to be opened in the editor if it is a
    /// file. Returns false when nothing is highlighted.
    pub fn request_enter(&mut self) -> bool {
        let Some(entry) = self.highlighted().cloned() else {
            return false;
        };

        if entry.is_dir {
            self.clear_chosen();
            tracing::debug!(target_dir = %entry.path.display(), "requesting directory change");
            self.emit(DirectoryEvent::DirectoryChangeRequested {
                new_dir: entry.path,
                from_dir: None,
            });
        } else {
            tracing::debug!(file = %entry.path.display(), editor = %self.editor, "requesting file open");
            self.emit(DirectoryEvent::OpenFileRequested {
                editor: self.editor.clone(),
                path: entry.path,
            });
        }
        true
    }

    /// Ask the container to switch to the parent directory. The filter text
    /// is dropped first. Returns false (and emits nothing) at the root.
    pub fn request_parent(&mut self) -> bool {
        let Some(parent) = self.path.parent().map(Path::to_path_buf) else {
            tracing::debug!(path = %self.path.display(), "already at root");
            return false;
        };

        if !self.filter.is_empty() {
            let highlighted = self.highlighted().map(|e| e.path.clone());
            self.reset_filter();
            self.cursor = highlighted
                .and_then(|p| self.position_of(&p))
                .or_else(|| self.clamp(0));
            self.emit_highlight();
            self.update_filter_warning();
        }

        tracing::debug!(target_dir = %parent.display(), "requesting parent directory");
        self.emit(DirectoryEvent::DirectoryChangeRequested {
            new_dir: parent,
            from_dir: Some(self.path.clone()),
        });
        true
    }

    /// Switch this view to `new_dir`. Container side of a
    /// `DirectoryChangeRequested` event: the listing is replaced, filter and
    /// chosen set are dropped, and the cursor lands on `from_dir` when given
    /// (the child the user came from), else on the first entry.
    ///
    /// On failure the current view is kept and the error recorded.
    pub fn navigate_to(&mut self, new_dir: &Path, from_dir: Option<&Path>) -> AppResult<()> {
        let listing = std::path::absolute(new_dir)
            .map_err(AppError::from)
            .and_then(|dir| Ok((self.provider.list_directory(&dir)?, dir)));
        let (entries, new_dir) = match listing {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(path = %new_dir.display(), error = %e, "cannot enter directory");
                self.error = Some(format!("Cannot enter '{}': {}", new_dir.display(), e));
                return Err(e);
            }
        };

        self.path = new_dir;
        self.entries = entries;
        self.error = None;
        self.reset_filter();
        self.clear_chosen();
        self.emit(DirectoryEvent::Refreshed);

        match from_dir {
            Some(from) => self.select_path(from),
            None => self.set_cursor(0),
        }
        self.update_filter_warning();
        Ok(())
    }

    /// Reload the listing of the current directory, keeping the filter.
    /// The cursor follows the highlighted entry if it survived, otherwise it
    /// is clamped into the new list.
    pub fn refresh(&mut self) -> AppResult<()> {
        let highlighted = self.highlighted().map(|e| e.path.clone());
        let old_cursor = self.cursor;

        let result = match self.provider.list_directory(&self.path) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "refresh failed");
                self.error = Some(e.to_string());
                self.entries.clear();
                Err(e)
            }
        };

        self.recompute_visible();
        self.cursor = highlighted
            .and_then(|p| self.position_of(&p))
            .or_else(|| self.clamp(old_cursor.unwrap_or(0)));

        self.emit(DirectoryEvent::Refreshed);
        self.emit_highlight();
        result
    }

    // ---- chosen set ----

    /// Add the highlighted entry to the chosen set, or remove it if present.
    /// Returns false when nothing is highlighted.
    pub fn toggle_chosen(&mut self) -> bool {
        let Some(path) = self.highlighted().map(|e| e.path.clone()) else {
            return false;
        };

        if !self.chosen.remove(&path) {
            self.chosen.insert(path);
        }
        self.emit(DirectoryEvent::SecondarySelectionChanged(self.chosen.clone()));
        true
    }

    /// Delete every chosen path from disk. Files are removed directly,
    /// directories recursively; failures are logged and skipped. The chosen
    /// set is emptied whatever happened, then the listing is reloaded.
    pub fn delete_chosen(&mut self) -> DeleteSummary {
        let mut targets: Vec<PathBuf> = self.chosen.drain().collect();
        targets.sort();

        let mut summary = DeleteSummary::default();
        for path in targets {
            if self.provider.is_plain_dir(&path) {
                let report = self.provider.remove_dir_recursive(&path);
                if report.is_complete() {
                    summary.removed += 1;
                } else {
                    for (failed, reason) in &report.failures {
                        tracing::warn!(path = %failed.display(), %reason, "could not delete");
                    }
                    let reason = format!("{} item(s) could not be removed", report.failures.len());
                    summary.failed.push((path, reason));
                }
            } else {
                match self.provider.remove_file(&path) {
                    Ok(()) => summary.removed += 1,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "could not delete");
                        summary.failed.push((path, e.to_string()));
                    }
                }
            }
        }
        tracing::info!(removed = summary.removed, failed = summary.failed.len(), "batch delete finished");

        self.emit(DirectoryEvent::SecondarySelectionChanged(HashSet::new()));
        // A failed refresh is recorded in `error`; the summary still stands
        let _ = self.refresh();
        summary
    }

    // ---- internals ----

    fn emit(&mut self, event: DirectoryEvent) {
        self.listeners.emit(event);
    }

    fn emit_highlight(&mut self) {
        let entry = self.highlighted().cloned();
        self.emit(DirectoryEvent::HighlightChanged(entry));
    }

    /// Clamp an index into the visible range; nothing visible means no cursor
    fn clamp(&self, index: usize) -> Option<usize> {
        if self.visible.is_empty() {
            None
        } else {
            Some(index.min(self.visible.len() - 1))
        }
    }

    fn move_to(&mut self, index: usize) {
        let new_cursor = self.clamp(index);
        if new_cursor != self.cursor {
            self.cursor = new_cursor;
            self.emit_highlight();
        }
    }

    fn position_of(&self, path: &Path) -> Option<usize> {
        self.visible
            .iter()
            .position(|&idx| self.entries[idx].path == path)
    }

    fn recompute_visible(&mut self) {
        let filter = &self.filter;
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| filter.is_match(&e.name))
            .map(|(idx, _)| idx)
            .collect();
    }

    /// Drop the filter without touching the chosen set
    fn reset_filter(&mut self) {
        self.filter = Filter::default();
        self.recompute_visible();
    }

    fn clear_chosen(&mut self) {
        if !self.chosen.is_empty() {
            self.chosen.clear();
            self.emit(DirectoryEvent::SecondarySelectionChanged(HashSet::new()));
        }
    }

    fn update_filter_warning(&mut self) {
        let active = self.focused && !self.filter.is_empty();
        if active != self.warning_shown {
            self.warning_shown = active;
            self.emit(DirectoryEvent::FilterWarning { active });
        }
    }
}
