//! Normal mode key handling

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;

pub fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => app.dir.move_next(),
        KeyCode::Char('k') | KeyCode::Up => app.dir.move_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.dir.move_first(),
        KeyCode::Char('G') | KeyCode::End => app.dir.move_last(),
        KeyCode::PageDown => {
            let page = app.scroll.height.max(1);
            let target = app.dir.cursor().map_or(0, |c| c + page);
            app.dir.set_cursor(target);
        }
        KeyCode::PageUp => {
            let page = app.scroll.height.max(1);
            let target = app.dir.cursor().map_or(0, |c| c.saturating_sub(page));
            app.dir.set_cursor(target);
        }

        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => app.enter(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => app.parent(),

        KeyCode::Char('/') => app.start_filter(),
        KeyCode::Esc => app.clear_filter(),

        KeyCode::Char(' ') | KeyCode::Insert => app.toggle_chosen(),
        KeyCode::Char('D') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.refresh(),
        _ => {}
    }
    app.process_events();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::test_keys::*;
    use crate::input::handle_key;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(tmp.path().join(name), name).unwrap();
        }
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let app = App::new(tmp.path(), &Config::default()).unwrap();
        (tmp, app)
    }

    #[test]
    fn test_motion_keys() {
        let (_tmp, mut app) = fixture();
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.dir.cursor(), Some(2));
        handle_key(&mut app, ch('k'));
        assert_eq!(app.dir.cursor(), Some(1));
        handle_key(&mut app, ch('G'));
        assert_eq!(app.dir.cursor(), Some(3));
        handle_key(&mut app, ch('g'));
        assert_eq!(app.dir.cursor(), Some(0));
    }

    #[test]
    fn test_page_keys_clamp() {
        let (_tmp, mut app) = fixture();
        app.scroll.height = 10;
        handle_key(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.dir.cursor(), Some(3));
        handle_key(&mut app, key(KeyCode::PageUp));
        assert_eq!(app.dir.cursor(), Some(0));
    }

    #[test]
    fn test_enter_and_parent_keys() {
        let (tmp, mut app) = fixture();
        handle_key(&mut app, ch('G'));
        handle_key(&mut app, ch('l'));
        assert_eq!(app.dir.path(), tmp.path().join("sub"));
        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.dir.path(), tmp.path());
        assert_eq!(app.dir.highlighted().unwrap().name, "sub");
    }

    #[test]
    fn test_space_chooses_and_advances() {
        let (tmp, mut app) = fixture();
        handle_key(&mut app, ch(' '));
        assert!(app.dir.is_chosen(&tmp.path().join("a")));
        assert_eq!(app.dir.cursor(), Some(1));
    }

    #[test]
    fn test_quit() {
        let (_tmp, mut app) = fixture();
        handle_key(&mut app, ch('q'));
        assert!(app.should_quit);
    }
}
