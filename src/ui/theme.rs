//! Color theme for the directory view
//!
//! Provides built-in presets (dark, light) and per-color overrides from config.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::style::{BaseStyle, StyleTag};

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Header
    pub header_fg: Color,
    pub header_bg: Color,

    // File list colors
    pub file_normal: Color,
    pub file_directory: Color,
    pub file_chosen: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub cursor_dir_fg: Color,
    pub meta_fg: Color,
    pub filter_match_bg: Color,
    pub filter_match_fg: Color,
    pub empty_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,
    pub status_error_fg: Color,
    pub warning_bg: Color,
    pub warning_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        let light_gray = Color::Rgb(220, 220, 220);
        let sage = Color::Rgb(171, 175, 135);
        let teal = Color::Rgb(0, 95, 95);

        Self {
            header_fg: Color::Rgb(200, 170, 100),
            header_bg: Color::Rgb(58, 58, 58),

            file_normal: light_gray,
            file_directory: sage,
            file_chosen: Color::Rgb(255, 220, 80),
            cursor_bg: teal,
            cursor_fg: light_gray,
            cursor_dir_fg: Color::Rgb(230, 235, 180),
            meta_fg: Color::Rgb(120, 120, 120),
            filter_match_bg: Color::Rgb(254, 166, 43),
            filter_match_fg: Color::Rgb(25, 16, 4),
            empty_fg: Color::Rgb(120, 120, 120),

            status_bg: Color::Rgb(95, 135, 135),
            status_fg: Color::Rgb(20, 20, 20),
            status_error_fg: Color::Rgb(255, 90, 90),
            warning_bg: Color::Rgb(254, 166, 43),
            warning_fg: Color::Rgb(25, 16, 4),
        }
    }

    /// Light theme for light terminal backgrounds
    pub fn light() -> Self {
        Self {
            header_fg: Color::Rgb(40, 40, 40),
            header_bg: Color::Rgb(215, 215, 215),

            file_normal: Color::Rgb(30, 30, 30),
            file_directory: Color::Rgb(0, 80, 160),
            file_chosen: Color::Rgb(170, 90, 0),
            cursor_bg: Color::Rgb(30, 144, 255),
            cursor_fg: Color::White,
            cursor_dir_fg: Color::White,
            meta_fg: Color::Rgb(110, 110, 110),
            filter_match_bg: Color::Rgb(254, 166, 43),
            filter_match_fg: Color::Rgb(25, 16, 4),
            empty_fg: Color::Rgb(140, 140, 140),

            status_bg: Color::Rgb(200, 200, 200),
            status_fg: Color::Rgb(20, 20, 20),
            status_error_fg: Color::Rgb(180, 0, 0),
            warning_bg: Color::Rgb(254, 166, 43),
            warning_fg: Color::Rgb(25, 16, 4),
        }
    }

    /// Get a built-in theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Apply custom color overrides from config
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (key, value) in overrides {
            let Some(color) = parse_color(value) else {
                tracing::warn!(key, value, "ignoring unparsable theme color");
                continue;
            };
            match key.as_str() {
                "header_fg" => self.header_fg = color,
                "header_bg" => self.header_bg = color,
                "file_normal" => self.file_normal = color,
                "file_directory" => self.file_directory = color,
                "file_chosen" => self.file_chosen = color,
                "cursor_bg" => self.cursor_bg = color,
                "cursor_fg" => self.cursor_fg = color,
                "cursor_dir_fg" => self.cursor_dir_fg = color,
                "meta_fg" => self.meta_fg = color,
                "filter_match_bg" => self.filter_match_bg = color,
                "filter_match_fg" => self.filter_match_fg = color,
                "empty_fg" => self.empty_fg = color,
                "status_bg" => self.status_bg = color,
                "status_fg" => self.status_fg = color,
                "status_error_fg" => self.status_error_fg = color,
                "warning_bg" => self.warning_bg = color,
                "warning_fg" => self.warning_fg = color,
                _ => tracing::warn!(key, "unknown theme color"),
            }
        }
        self
    }

    /// Styles for the name and metadata columns of a row
    pub fn entry_styles(&self, tag: StyleTag) -> (Style, Style) {
        let (mut name, mut meta) = match tag.base {
            BaseStyle::File => (
                Style::default().fg(self.file_normal),
                Style::default().fg(self.meta_fg),
            ),
            BaseStyle::Directory => (
                Style::default().fg(self.file_directory).add_modifier(Modifier::BOLD),
                Style::default().fg(self.meta_fg).add_modifier(Modifier::DIM),
            ),
            BaseStyle::Highlighted => (
                Style::default().bg(self.cursor_bg).fg(self.cursor_fg),
                Style::default().bg(self.cursor_bg).fg(self.cursor_fg),
            ),
            BaseStyle::HighlightedDirectory => (
                Style::default()
                    .bg(self.cursor_bg)
                    .fg(self.cursor_dir_fg)
                    .add_modifier(Modifier::BOLD),
                Style::default().bg(self.cursor_bg).fg(self.cursor_fg),
            ),
        };

        if tag.chosen {
            name = name.fg(self.file_chosen).add_modifier(Modifier::BOLD);
            meta = meta.fg(self.file_chosen);
            if tag.is_highlighted() {
                name = name.add_modifier(Modifier::UNDERLINED);
            }
        }
        if tag.dimmed {
            name = name.add_modifier(Modifier::DIM);
        }
        (name, meta)
    }

    /// Style for the parts of a name matched by the filter
    pub fn filter_match(&self) -> Style {
        Style::default().bg(self.filter_match_bg).fg(self.filter_match_fg)
    }
}

/// Theme configuration stored in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Active theme name: "dark" or "light"
    pub preset: String,
    /// Custom color overrides for the active theme
    pub colors: HashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: "dark".to_string(),
            colors: HashMap::new(),
        }
    }
}

impl ThemeConfig {
    /// Build the theme, falling back to dark for unknown preset names
    pub fn build_theme(&self) -> Theme {
        let base = Theme::by_name(&self.preset).unwrap_or_else(|| {
            tracing::warn!(preset = %self.preset, "unknown theme preset, using dark");
            Theme::dark()
        });
        base.with_overrides(&self.colors)
    }
}

/// Parse a color string: named color, #RRGGBB, or rgb(R,G,B)
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    // Named colors
    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "white" => return Some(Color::White),
        "gray" | "grey" => return Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "reset" => return Some(Color::Reset),
        _ => {}
    }

    // Hex color: #RRGGBB or RRGGBB
    let hex = s.strip_prefix('#').unwrap_or(&s);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    // RGB format: rgb(R,G,B)
    if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse().ok()?;
            let g = parts[1].trim().parse().ok()?;
            let b = parts[2].trim().parse().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}
