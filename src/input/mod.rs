//! Input handling
//!
//! Dispatches key events based on the current application mode.

mod normal;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};

/// Handle a key event based on current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    app.message = None;
    match &app.mode {
        Mode::Normal => normal::handle_normal_mode(app, key),
        Mode::Filter { .. } => prompt::handle_filter_mode(app, key),
        Mode::ConfirmDelete { .. } => prompt::handle_confirm_delete_mode(app, key),
    }
}

/// Handle a mouse event: the wheel moves the cursor, clicks are ignored
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if matches!(app.mode, Mode::ConfirmDelete { .. }) {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => app.dir.move_next(),
        MouseEventKind::ScrollUp => app.dir.move_previous(),
        _ => return,
    }
    app.process_events();
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ch(c: char) -> KeyEvent {
        key(KeyCode::Char(c))
    }
}
