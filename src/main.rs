//! perch - a terminal directory browser

use std::io::{self, stdout};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use perch::app::App;
use perch::config::{config_dir, Config};
use perch::editor::{self, TerminalSuspend};
use perch::input;
use perch::logging;
use perch::ui::{DirectoryView, HeaderBar, StatusBar};

/// Set up panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

/// Initialize the terminal for TUI mode
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore terminal to normal mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = HeaderBar::new(&app.dir, &app.theme).with_warning(app.filter_warning);
    frame.render_widget(header, chunks[0]);

    let list = DirectoryView::new(&app.dir, &app.theme);
    frame.render_stateful_widget(list, chunks[1], &mut app.scroll);

    let prompt = app.prompt();
    let status = StatusBar::new(&app.dir, &app.theme)
        .with_message(app.message.as_deref())
        .with_prompt(prompt.as_deref());
    frame.render_widget(status, chunks[2]);
}

/// Main event loop
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(edit) = app.take_pending_edit() {
            let result = {
                let _suspend = TerminalSuspend::new()?;
                editor::launch(&edit.editor, &edit.path)
            };
            terminal.clear()?;
            app.finish_edit(result);
            continue;
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                // Resizes only need the redraw at the top of the loop
                _ => {}
            }
        }
    }
}

/// Directory to open: first CLI argument, then config, then the working directory
fn start_dir(config: &Config) -> io::Result<PathBuf> {
    let dir = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => match config.start_dir() {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        },
    };
    dir.canonicalize()
}

fn main() -> ExitCode {
    setup_panic_hook();

    let (config, warnings) = Config::load();

    let _log_guard = match config_dir() {
        Some(dir) => match logging::init(&dir, &config.logging.level) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Warning: {}", e);
                None
            }
        },
        None => None,
    };
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let start = match start_dir(&config) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("perch: cannot open start directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = match App::new(&start, &config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("perch: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = setup_terminal().and_then(|mut terminal| run(&mut terminal, &mut app));
    let restored = restore_terminal();

    match result.and(restored) {
        Ok(()) => {
            tracing::info!("exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "terminal failure");
            eprintln!("perch: {}", e);
            ExitCode::FAILURE
        }
    }
}
