//! Notifications a directory view sends to its container

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::fs::Entry;

/// Something about the directory view changed, or the view wants the
/// container to act.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryEvent {
    /// The highlighted entry changed (`None` when nothing is visible)
    HighlightChanged(Option<Entry>),
    /// The container should show `new_dir`. `from_dir` is set when stepping
    /// up, so the container can re-select the directory that was left.
    DirectoryChangeRequested {
        new_dir: PathBuf,
        from_dir: Option<PathBuf>,
    },
    /// The chosen set (secondary selection) changed; carries the full set
    SecondarySelectionChanged(HashSet<PathBuf>),
    /// The highlighted file should be opened in `editor`
    OpenFileRequested { editor: String, path: PathBuf },
    /// Whether the "listing is filtered" warning should be shown
    FilterWarning { active: bool },
    /// The listing was reloaded from disk
    Refreshed,
}

type Listener = Box<dyn FnMut(&DirectoryEvent) + Send>;

/// Registered listeners, called synchronously in registration order.
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DirectoryEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: DirectoryEvent) {
        tracing::trace!(?event, "directory event");
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
