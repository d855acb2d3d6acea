//! Directory list widget

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

use super::style::style;
use super::Theme;
use crate::fs::{Entry, EntryMetadata};
use crate::state::DirectoryState;

/// Width reserved for the metadata column
const META_WIDTH: u16 = 8;

const EMPTY_PLACEHOLDER: &str = "─ Empty directory ─";
const NO_MATCH_PLACEHOLDER: &str = "─ No matches ─";

/// Scroll position of the list, kept by the owner between frames
#[derive(Debug, Default, Clone, Copy)]
pub struct ListScroll {
    pub offset: usize,
    /// Rows available in the last render
    pub height: usize,
}

impl ListScroll {
    /// Adjust `offset` so `cursor` lies inside a window of `height` rows
    pub fn follow(&mut self, cursor: Option<usize>, total: usize, height: usize) {
        self.height = height;
        let Some(cursor) = cursor else {
            self.offset = 0;
            return;
        };
        if height == 0 {
            self.offset = cursor;
            return;
        }
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + height {
            self.offset = cursor + 1 - height;
        }
        // Don't leave blank rows at the bottom when the list shrank
        let max_offset = total.saturating_sub(height);
        self.offset = self.offset.min(max_offset);
    }
}

/// Renders the visible entries of a [`DirectoryState`]
pub struct DirectoryView<'a> {
    dir: &'a DirectoryState,
    theme: &'a Theme,
}

impl<'a> DirectoryView<'a> {
    pub fn new(dir: &'a DirectoryState, theme: &'a Theme) -> Self {
        Self { dir, theme }
    }

    fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
        let text = if self.dir.all_entries().is_empty() {
            EMPTY_PLACEHOLDER
        } else {
            NO_MATCH_PLACEHOLDER
        };
        let width = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let style = Style::default().fg(self.theme.empty_fg);
        buf.set_stringn(x, area.y, text, area.width as usize, style);
    }
}

impl StatefulWidget for DirectoryView<'_> {
    type State = ListScroll;

    fn render(self, area: Rect, buf: &mut Buffer, scroll: &mut Self::State) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let rows = area.height as usize;
        let total = self.dir.visible_count();
        let cursor = self.dir.cursor();
        scroll.follow(cursor, total, rows);

        if total == 0 {
            self.render_placeholder(area, buf);
            return;
        }

        let name_width = area.width.saturating_sub(META_WIDTH + 1);

        for (row, index) in (scroll.offset..total.min(scroll.offset + rows)).enumerate() {
            let Some(entry) = self.dir.entry_at(index) else {
                continue;
            };
            let y = area.y + row as u16;
            let tag = style(entry, cursor == Some(index), self.dir.is_chosen(&entry.path));
            let (name_style, meta_style) = self.theme.entry_styles(tag);

            // Paint the whole row first so the cursor bar spans the width
            buf.set_style(Rect::new(area.x, y, area.width, 1), name_style);

            let matches = self.dir.filter_matches(&entry.name);
            let line = name_line(entry, &matches, name_style, self.theme.filter_match());
            buf.set_line(area.x, y, &line, name_width);

            if name_width < area.width {
                let meta = EntryMetadata::for_entry(entry, self.dir.provider()).to_string();
                let meta = format!("{:>width$}", meta, width = META_WIDTH as usize);
                let meta_x = area.x + area.width - META_WIDTH;
                buf.set_stringn(meta_x, y, &meta, META_WIDTH as usize, meta_style);
            }
        }
    }
}

impl Widget for DirectoryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut scroll = ListScroll::default();
        StatefulWidget::render(self, area, buf, &mut scroll);
    }
}

/// Display name split into spans, filter matches drawn with `matched`
fn name_line<'a>(entry: &'a Entry, matches: &[Range<usize>], base: Style, matched: Style) -> Line<'a> {
    let name = entry.name.as_str();
    let mut spans = Vec::new();
    let mut pos = 0;
    for range in matches {
        if range.start > pos {
            spans.push(Span::styled(&name[pos..range.start], base));
        }
        spans.push(Span::styled(&name[range.start..range.end], matched));
        pos = range.end;
    }
    if pos < name.len() {
        spans.push(Span::styled(&name[pos..], base));
    }
    if entry.is_dir {
        spans.push(Span::styled("/", base));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.x + area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn fixture() -> (TempDir, DirectoryState) {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("docs/a"), b"").unwrap();
        fs::write(tmp.path().join("notes.txt"), b"hello").unwrap();
        let dir = DirectoryState::new(tmp.path(), "vi").unwrap();
        (tmp, dir)
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut scroll = ListScroll::default();
        scroll.follow(Some(2), 10, 5);
        assert_eq!(scroll.offset, 0);
        scroll.follow(Some(7), 10, 5);
        assert_eq!(scroll.offset, 3);
        scroll.follow(Some(1), 10, 5);
        assert_eq!(scroll.offset, 1);
        scroll.follow(None, 0, 5);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn test_scroll_clamps_when_list_shrinks() {
        let mut scroll = ListScroll { offset: 8, height: 5 };
        scroll.follow(Some(2), 4, 5);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn test_renders_names_and_metadata() {
        let (_tmp, dir) = fixture();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let mut scroll = ListScroll::default();
        StatefulWidget::render(DirectoryView::new(&dir, &theme), area, &mut buf, &mut scroll);

        let first = row_text(&buf, 0);
        assert!(first.starts_with("docs/"));
        assert!(first.trim_end().ends_with('1'));
        let second = row_text(&buf, 1);
        assert!(second.starts_with("notes.txt"));
        assert!(second.trim_end().ends_with("5B"));
        assert_eq!(row_text(&buf, 2).trim(), "");

        assert_eq!(buf[(0, 0)].bg, theme.cursor_bg);
        assert_ne!(buf[(0, 1)].bg, theme.cursor_bg);
    }

    #[test]
    fn test_filter_matches_are_highlighted() {
        let (_tmp, mut dir) = fixture();
        dir.set_filter("tes");
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);
        StatefulWidget::render(DirectoryView::new(&dir, &theme), area, &mut buf, &mut ListScroll::default());

        assert!(row_text(&buf, 0).starts_with("notes.txt"));
        // "no" plain, "tes" matched
        assert_eq!(buf[(2, 0)].bg, theme.filter_match_bg);
        assert_eq!(buf[(4, 0)].bg, theme.filter_match_bg);
        assert_ne!(buf[(5, 0)].bg, theme.filter_match_bg);
    }

    #[test]
    fn test_stateless_render_matches_stateful() {
        let (_tmp, dir) = fixture();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 2);

        let mut plain = Buffer::empty(area);
        Widget::render(DirectoryView::new(&dir, &theme), area, &mut plain);
        let mut stateful = Buffer::empty(area);
        StatefulWidget::render(DirectoryView::new(&dir, &theme), area, &mut stateful, &mut ListScroll::default());
        assert_eq!(plain, stateful);
    }

    #[test]
    fn test_placeholders() {
        let tmp = TempDir::new().unwrap();
        let mut dir = DirectoryState::new(tmp.path(), "vi").unwrap();
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 1);

        let mut buf = Buffer::empty(area);
        StatefulWidget::render(DirectoryView::new(&dir, &theme), area, &mut buf, &mut ListScroll::default());
        assert!(row_text(&buf, 0).contains("Empty directory"));

        fs::write(tmp.path().join("file"), b"").unwrap();
        dir.refresh().unwrap();
        dir.set_filter("zzz");
        let mut buf = Buffer::empty(area);
        StatefulWidget::render(DirectoryView::new(&dir, &theme), area, &mut buf, &mut ListScroll::default());
        assert!(row_text(&buf, 0).contains("No matches"));
    }
}
