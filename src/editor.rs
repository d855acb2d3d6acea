//! External editor launching

use std::io::{self, stdout};
use std::path::Path;
use std::process::Command;

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::errors::{AppError, AppResult};

/// Hands the terminal back to the shell while alive; the TUI screen is
/// restored on drop, also when the editor fails.
pub struct TerminalSuspend {
    _private: (),
}

impl TerminalSuspend {
    pub fn new() -> io::Result<Self> {
        disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSuspend {
    fn drop(&mut self) {
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, Hide).and_then(|_| enable_raw_mode()) {
            tracing::error!(error = %e, "could not restore terminal after editor");
        }
    }
}

/// Split an editor command line into program and arguments
fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Run `command` on `path` and wait for it to exit. The caller owns the
/// terminal handover (see [`TerminalSuspend`]).
pub fn launch(command: &str, path: &Path) -> AppResult<()> {
    let editor_error = |reason: String| AppError::Editor {
        command: command.to_string(),
        reason,
    };

    let (program, args) = split_command(command).ok_or_else(|| editor_error("empty command".to_string()))?;

    tracing::info!(editor = command, file = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .map_err(|e| editor_error(e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(editor_error(format!("exited with {}", status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("vi"), Some(("vi", vec![])));
        assert_eq!(split_command("code --wait -n"), Some(("code", vec!["--wait", "-n"])));
        assert_eq!(split_command("   "), None);
    }

    #[test]
    fn test_empty_command_is_an_error() {
        let err = launch("", Path::new("/tmp/x")).unwrap_err();
        assert!(matches!(err, AppError::Editor { .. }));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let err = launch("perch-no-such-editor-binary", Path::new("/tmp/x")).unwrap_err();
        assert!(err.to_string().contains("perch-no-such-editor-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        assert!(launch("true", Path::new("/tmp/x")).is_ok());
        let err = launch("false", Path::new("/tmp/x")).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
