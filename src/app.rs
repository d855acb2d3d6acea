//! Application state for the terminal container
//!
//! Hosts one [`DirectoryState`], drains its events and answers them:
//! directory change requests are served with `navigate_to`, open requests
//! are parked in `pending_edit` for the main loop, which owns the terminal.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use crate::config::Config;
use crate::errors::AppResult;
use crate::state::{DirectoryEvent, DirectoryState};
use crate::ui::{ListScroll, Theme};

/// Input mode of the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Typing a filter; applied live on every keystroke
    Filter { input: String },
    /// Waiting for y/n before deleting `count` chosen entries
    ConfirmDelete { count: usize },
}

/// File waiting to be opened once the terminal is handed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub editor: String,
    pub path: PathBuf,
}

pub struct App {
    pub dir: DirectoryState,
    pub mode: Mode,
    pub theme: Theme,
    pub scroll: ListScroll,
    /// Transient status line message, cleared on the next key
    pub message: Option<String>,
    /// Filter warning state as last reported by the view
    pub filter_warning: bool,
    pub pending_edit: Option<PendingEdit>,
    pub should_quit: bool,
    confirm_delete: bool,
    events: Receiver<DirectoryEvent>,
}

impl App {
    pub fn new(start: &Path, config: &Config) -> AppResult<Self> {
        let editor = config.resolve_editor();
        tracing::info!(start = %start.display(), %editor, "opening directory view");

        let mut dir = DirectoryState::new(start, editor)?;
        let (tx, rx) = mpsc::channel();
        dir.subscribe(move |event| {
            // Receiver lives as long as the app; a send error means shutdown
            let _ = tx.send(event.clone());
        });
        dir.focus();

        let mut app = Self {
            dir,
            mode: Mode::Normal,
            theme: config.theme.build_theme(),
            scroll: ListScroll::default(),
            message: None,
            filter_warning: false,
            pending_edit: None,
            should_quit: false,
            confirm_delete: config.general.confirm_delete,
            events: rx,
        };
        app.process_events();
        Ok(app)
    }

    /// Handle everything the view emitted since the last call
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                DirectoryEvent::DirectoryChangeRequested { new_dir, from_dir } => {
                    if let Err(e) = self.dir.navigate_to(&new_dir, from_dir.as_deref()) {
                        self.message = Some(e.to_string());
                    }
                }
                DirectoryEvent::OpenFileRequested { editor, path } => {
                    self.pending_edit = Some(PendingEdit { editor, path });
                }
                DirectoryEvent::FilterWarning { active } => {
                    self.filter_warning = active;
                }
                DirectoryEvent::HighlightChanged(entry) => {
                    tracing::trace!(entry = ?entry.map(|e| e.path), "highlight changed");
                }
                DirectoryEvent::SecondarySelectionChanged(chosen) => {
                    tracing::trace!(count = chosen.len(), "chosen set changed");
                }
                DirectoryEvent::Refreshed => {}
            }
        }
    }

    /// Take the parked open request, if any
    pub fn take_pending_edit(&mut self) -> Option<PendingEdit> {
        let edit = self.pending_edit.take()?;
        self.dir.blur();
        self.process_events();
        Some(edit)
    }

    /// Back from the editor: report failures and pick up changes on disk
    pub fn finish_edit(&mut self, result: AppResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "editor failed");
            self.message = Some(e.to_string());
        }
        if let Err(e) = self.dir.refresh() {
            self.message = Some(e.to_string());
        }
        self.dir.focus();
        self.process_events();
    }

    pub fn refresh(&mut self) {
        match self.dir.refresh() {
            Ok(()) => self.message = Some("Refreshed".to_string()),
            Err(e) => self.message = Some(e.to_string()),
        }
        self.process_events();
    }

    pub fn enter(&mut self) {
        self.dir.request_enter();
        self.process_events();
    }

    pub fn parent(&mut self) {
        if !self.dir.request_parent() {
            self.message = Some("Already at the filesystem root".to_string());
        }
        self.process_events();
    }

    pub fn start_filter(&mut self) {
        let input = self.dir.filter().pattern().to_string();
        self.mode = Mode::Filter { input };
    }

    /// Apply the filter prompt text to the view
    pub fn update_filter(&mut self, input: &str) {
        self.dir.set_filter(input);
        self.process_events();
    }

    pub fn clear_filter(&mut self) {
        self.dir.clear_filter();
        self.mode = Mode::Normal;
        self.process_events();
    }

    pub fn toggle_chosen(&mut self) {
        if self.dir.toggle_chosen() {
            self.dir.move_next();
        }
        self.process_events();
    }

    /// Start deleting the chosen set, asking first when configured to
    pub fn request_delete(&mut self) {
        let count = self.dir.chosen().len();
        if count == 0 {
            self.message = Some("Nothing chosen".to_string());
        } else if self.confirm_delete {
            self.mode = Mode::ConfirmDelete { count };
        } else {
            self.delete_chosen();
        }
    }

    pub fn delete_chosen(&mut self) {
        let summary = self.dir.delete_chosen();
        self.message = Some(summary.message());
        self.mode = Mode::Normal;
        self.process_events();
    }

    /// Prompt text for the status line, if a prompt is open
    pub fn prompt(&self) -> Option<String> {
        match &self.mode {
            Mode::Normal => None,
            Mode::Filter { input } => Some(format!("Filter: {}_", input)),
            Mode::ConfirmDelete { count } => Some(format!("Delete {} chosen item(s)? (y/n)", count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("inner")).unwrap();
        fs::write(tmp.path().join("inner/deep.txt"), b"x").unwrap();
        fs::write(tmp.path().join("readme.md"), b"hello").unwrap();
        let app = App::new(tmp.path(), &Config::default()).unwrap();
        (tmp, app)
    }

    fn highlighted_name(app: &App) -> String {
        app.dir.highlighted().map(|e| e.name.clone()).unwrap_or_default()
    }

    #[test]
    fn test_enter_and_leave_directory() {
        let (tmp, mut app) = fixture();
        app.enter();
        assert_eq!(app.dir.path(), tmp.path().join("inner"));
        assert_eq!(highlighted_name(&app), "deep.txt");

        app.parent();
        assert_eq!(app.dir.path(), tmp.path());
        assert_eq!(highlighted_name(&app), "inner");
    }

    #[test]
    fn test_enter_file_parks_edit_request() {
        let (tmp, mut app) = fixture();
        app.dir.move_next();
        app.enter();
        let pending = app.take_pending_edit().unwrap();
        assert_eq!(pending.path, tmp.path().join("readme.md"));
        assert!(!pending.editor.is_empty());
        assert!(app.take_pending_edit().is_none());
        assert_eq!(app.dir.path(), tmp.path());
        assert!(!app.dir.is_focused());

        app.finish_edit(Ok(()));
        assert!(app.dir.is_focused());
    }

    #[test]
    fn test_finish_edit_reports_failure() {
        let (_tmp, mut app) = fixture();
        app.finish_edit(Err(crate::errors::AppError::Editor {
            command: "nope".to_string(),
            reason: "not found".to_string(),
        }));
        assert!(app.message.as_deref().unwrap().contains("nope"));
    }

    #[test]
    fn test_filter_warning_tracks_view() {
        let (_tmp, mut app) = fixture();
        app.update_filter("read");
        assert!(app.filter_warning);
        app.clear_filter();
        assert!(!app.filter_warning);
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let (tmp, mut app) = fixture();
        app.request_delete();
        assert_eq!(app.message.as_deref(), Some("Nothing chosen"));

        app.toggle_chosen();
        app.request_delete();
        assert_eq!(app.mode, Mode::ConfirmDelete { count: 1 });
        assert_eq!(app.prompt().as_deref(), Some("Delete 1 chosen item(s)? (y/n)"));
        assert!(tmp.path().join("inner").exists());

        app.delete_chosen();
        assert_eq!(app.mode, Mode::Normal);
        assert!(!tmp.path().join("inner").exists());
        assert_eq!(app.message.as_deref(), Some("Deleted 1 item(s)"));
    }

    #[test]
    fn test_parent_at_root_sets_message() {
        let mut app = App::new(Path::new("/"), &Config::default()).unwrap();
        app.parent();
        assert_eq!(app.dir.path(), Path::new("/"));
        assert!(app.message.is_some());
    }
}
