//! Header and status bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::Theme;
use crate::fs::EntryMetadata;
use crate::state::DirectoryState;

const SEPARATOR: &str = " │ ";

/// Top line: current directory, active filter and chosen count
pub struct HeaderBar<'a> {
    dir: &'a DirectoryState,
    theme: &'a Theme,
    warning: bool,
}

impl<'a> HeaderBar<'a> {
    pub fn new(dir: &'a DirectoryState, theme: &'a Theme) -> Self {
        Self { dir, theme, warning: false }
    }

    /// Draw the filter in warning colors (a filter is hiding entries)
    pub fn with_warning(mut self, warning: bool) -> Self {
        self.warning = warning;
        self
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let style = Style::default().bg(self.theme.header_bg).fg(self.theme.header_fg);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), style);

        let filter = if self.dir.filter().is_empty() {
            String::new()
        } else {
            let kind = if self.dir.filter().is_literal() { "text" } else { "filter" };
            format!(" {}: {} ", kind, self.dir.filter().pattern())
        };
        let chosen = match self.dir.chosen().len() {
            0 => String::new(),
            n => format!("{}{} chosen ", if filter.is_empty() { " " } else { "│ " }, n),
        };

        let filter_len = filter.chars().count();
        let right_len = filter_len + chosen.chars().count();
        let path_width = (area.width as usize).saturating_sub(right_len + 2);
        let path = truncate_path(&self.dir.path().to_string_lossy(), path_width);
        let path_style = if self.dir.is_focused() {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        };
        buf.set_string(area.x + 1, area.y, &path, path_style);

        if right_len > 0 && right_len < area.width as usize {
            let filter_style = if self.warning {
                Style::default().bg(self.theme.warning_bg).fg(self.theme.warning_fg)
            } else {
                style
            };
            let right_x = area.x + area.width - right_len as u16;
            buf.set_string(right_x, area.y, &filter, filter_style);
            buf.set_string(right_x + filter_len as u16, area.y, &chosen, style);
        }
    }
}

/// Bottom line: prompt, error, filter warning, last message, or highlight info
pub struct StatusBar<'a> {
    dir: &'a DirectoryState,
    theme: &'a Theme,
    message: Option<&'a str>,
    prompt: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(dir: &'a DirectoryState, theme: &'a Theme) -> Self {
        Self { dir, theme, message: None, prompt: None }
    }

    pub fn with_message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    /// Show a prompt line (filter input, confirmation) instead of the usual info
    pub fn with_prompt(mut self, prompt: Option<&'a str>) -> Self {
        self.prompt = prompt;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let style = Style::default().bg(self.theme.status_bg).fg(self.theme.status_fg);
        buf.set_style(Rect::new(area.x, area.y, area.width, 1), style);
        let width = area.width as usize;

        if let Some(prompt) = self.prompt {
            let prompt_style = Style::default()
                .bg(self.theme.cursor_bg)
                .fg(self.theme.cursor_fg)
                .add_modifier(Modifier::BOLD);
            let display = format!(" {} ", prompt);
            buf.set_string(area.x, area.y, truncate_path(&display, width), prompt_style);
            return;
        }

        if let Some(error) = self.dir.error() {
            let error_style = style.fg(self.theme.status_error_fg).add_modifier(Modifier::BOLD);
            let msg = format!(" {} ", error);
            buf.set_string(area.x, area.y, truncate_str(&msg, width), error_style);
            return;
        }

        if self.dir.visible_count() == 0 && !self.dir.filter().is_empty() {
            let warning_style = Style::default()
                .bg(self.theme.warning_bg)
                .fg(self.theme.warning_fg)
                .add_modifier(Modifier::BOLD);
            let msg = format!(" No entries match '{}' (Esc clears) ", self.dir.filter().pattern());
            buf.set_string(area.x, area.y, truncate_str(&msg, width), warning_style);
            return;
        }

        let mut x_offset: u16 = 0;
        if let Some(message) = self.message {
            let display = format!(" {} ", message);
            let display = truncate_str(&display, width);
            buf.set_string(area.x, area.y, &display, style.add_modifier(Modifier::BOLD));
            x_offset = display.chars().count() as u16;
        }

        let Some(entry) = self.dir.highlighted() else {
            return;
        };
        let meta = EntryMetadata::for_entry(entry, self.dir.provider());
        let info_style = if meta.is_unknown() {
            style.fg(self.theme.status_error_fg)
        } else {
            style
        };
        let meta = match meta {
            EntryMetadata::Unknown => "unavailable".to_string(),
            EntryMetadata::Children(n) => format!("{} item(s)", n),
            other => other.to_string(),
        };
        let position = format!(
            "{}/{}",
            self.dir.cursor().map_or(0, |c| c + 1),
            self.dir.visible_count()
        );
        let info = format!("{}{}{}{} ", entry.display_name(), SEPARATOR, meta, SEPARATOR);
        let info = format!("{}{}", info, position);

        let available = width.saturating_sub(x_offset as usize + 1);
        if available < 4 {
            return;
        }
        let info = truncate_path(&info, available);
        let info_x = area.x + area.width - info.chars().count() as u16 - 1;
        buf.set_string(info_x.max(area.x + x_offset), area.y, &info, info_style);
    }
}

/// Truncate a string to max_width (keeps the start)
fn truncate_str(s: &str, max_width: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let mut result: String = s.chars().take(max_width - 1).collect();
        result.push('…');
        result
    }
}

/// Truncate a path to max_width (keeps the end)
fn truncate_path(s: &str, max_width: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let skip = char_count - max_width + 1;
        let mut result = String::from("…");
        result.extend(s.chars().skip(skip));
        result
    }
}
