//! Filter prompt and delete confirmation

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Mode};

pub fn handle_filter_mode(app: &mut App, key: KeyEvent) {
    let Mode::Filter { input } = &mut app.mode else {
        return;
    };

    match key.code {
        KeyCode::Enter => app.mode = Mode::Normal,
        KeyCode::Esc => app.clear_filter(),
        KeyCode::Backspace => {
            input.pop();
            let pattern = input.clone();
            app.update_filter(&pattern);
        }
        KeyCode::Char(c) => {
            input.push(c);
            let pattern = input.clone();
            app.update_filter(&pattern);
        }
        // Keep the cursor reachable while typing
        KeyCode::Down => app.dir.move_next(),
        KeyCode::Up => app.dir.move_previous(),
        _ => {}
    }
}

pub fn handle_confirm_delete_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.delete_chosen(),
        _ => {
            app.mode = Mode::Normal;
            app.message = Some("Delete cancelled".to_string());
        }
    }
}
