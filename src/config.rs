//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::ui::ThemeConfig;

/// Editor used when nothing else is configured
pub const FALLBACK_EDITOR: &str = "vi";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Editor settings
    pub editor: EditorConfig,
    /// Log settings
    pub logging: LogConfig,
    /// Theme settings
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory to open when none is given on the command line
    pub start_dir: Option<String>,
    /// Ask before deleting the chosen entries
    pub confirm_delete: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_dir: None,
            confirm_delete: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// External editor command (empty = use $VISUAL/$EDITOR/vi)
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, overridden by PERCH_LOG
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config")))
        .map(|p| p.join("perch"))
}

/// Get the config file path
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Default config file content with comments
fn default_config() -> &'static str {
    r##"# perch configuration
# This file is auto-generated. Edit as needed.

[general]
# Directory opened when none is given on the command line
# start_dir = "~/projects"

# Ask before deleting chosen entries
confirm_delete = true

[editor]
# Command used to open files (empty = $VISUAL, then $EDITOR, then vi)
# Arguments are allowed, e.g. "code --wait"
command = ""

[logging]
# Log filter, e.g. "debug" or "perch=trace". PERCH_LOG overrides it.
# Logs go to perch.log next to this file.
level = "info"

[theme]
# Built-in presets: "dark", "light"
preset = "dark"

# Override individual colors (named, #RRGGBB or rgb(R,G,B))
[theme.colors]
# cursor_bg = "#005f5f"
# file_directory = "rgb(171, 175, 135)"
"##
}

impl Config {
    /// Load configuration from the config file, creating the default file if
    /// it doesn't exist. Never fails: problems fall back to defaults and are
    /// returned as warnings, to be logged once logging is up.
    pub fn load() -> (Self, Vec<String>) {
        let Some(config_path) = config_file() else {
            return (
                Config::default(),
                vec!["could not determine config directory".to_string()],
            );
        };

        let mut warnings = Vec::new();
        if let Err(e) = write_default_if_missing(&config_path) {
            warnings.push(e.to_string());
        }

        match Self::load_from(&config_path) {
            Ok(config) => (config, warnings),
            Err(e) => {
                warnings.push(format!("{}; using default configuration", e));
                (Config::default(), warnings)
            }
        }
    }

    /// Read and parse a config file
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("could not read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| AppError::Config(format!("could not parse {}: {}", path.display(), e)))
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> AppResult<Self> {
        toml_edit::de::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Resolve the editor command: config, then $VISUAL, then $EDITOR, then vi
    pub fn resolve_editor(&self) -> String {
        resolve_editor_from(
            &self.editor.command,
            std::env::var("VISUAL").ok(),
            std::env::var("EDITOR").ok(),
        )
    }

    /// Start directory from config, with a leading `~` expanded
    pub fn start_dir(&self) -> Option<PathBuf> {
        let dir = self.general.start_dir.as_deref()?.trim();
        if dir.is_empty() {
            return None;
        }
        match dir.strip_prefix("~") {
            Some(rest) => {
                let home = std::env::var("HOME").ok()?;
                Some(PathBuf::from(home).join(rest.trim_start_matches('/')))
            }
            None => Some(PathBuf::from(dir)),
        }
    }
}

fn write_default_if_missing(config_path: &Path) -> AppResult<()> {
    if config_path.exists() {
        return Ok(());
    }
    if let Some(dir) = config_path.parent() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Config(format!("could not create config directory: {}", e))
        })?;
    }
    fs::write(config_path, default_config())
        .map_err(|e| AppError::Config(format!("could not create config file: {}", e)))
}

fn resolve_editor_from(configured: &str, visual: Option<String>, editor: Option<String>) -> String {
    [Some(configured.to_string()), visual, editor]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(default_config()).unwrap();
        assert!(config.general.confirm_delete);
        assert!(config.editor.command.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.theme.preset, "dark");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[editor]\ncommand = \"nano\"\n").unwrap();
        assert_eq!(config.editor.command, "nano");
        assert!(config.general.confirm_delete);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let err = Config::parse("[general\nconfirm_delete = 3").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::load_from(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_write_default_once() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("perch/config.toml");
        write_default_if_missing(&path).unwrap();
        assert!(Config::load_from(&path).is_ok());

        fs::write(&path, "[editor]\ncommand = \"ed\"\n").unwrap();
        write_default_if_missing(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().editor.command, "ed");
    }

    #[test]
    fn test_editor_resolution_order() {
        let env = |s: &str| Some(s.to_string());
        assert_eq!(resolve_editor_from("hx", env("code"), env("nano")), "hx");
        assert_eq!(resolve_editor_from("", env("code"), env("nano")), "code");
        assert_eq!(resolve_editor_from(" ", env(""), env("nano")), "nano");
        assert_eq!(resolve_editor_from("", None, None), FALLBACK_EDITOR);
    }
}
