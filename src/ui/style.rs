//! Presentation category of a listed entry
//!
//! Kept free of colors: the renderer maps a [`StyleTag`] onto the active
//! [`Theme`](super::Theme).

use crate::fs::Entry;

/// Base look of an entry row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseStyle {
    File,
    Directory,
    Highlighted,
    HighlightedDirectory,
}

/// How one entry row should look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTag {
    pub base: BaseStyle,
    /// Entry is in the chosen set
    pub chosen: bool,
    /// De-emphasized (hidden entry that is not under the cursor)
    pub dimmed: bool,
}

impl StyleTag {
    pub fn is_highlighted(&self) -> bool {
        matches!(self.base, BaseStyle::Highlighted | BaseStyle::HighlightedDirectory)
    }
}

/// Style of an entry row from its type and its cursor/chosen state
pub fn style(entry: &Entry, is_highlighted: bool, is_chosen: bool) -> StyleTag {
    let base = match (is_highlighted, entry.is_dir) {
        (true, true) => BaseStyle::HighlightedDirectory,
        (true, false) => BaseStyle::Highlighted,
        (false, true) => BaseStyle::Directory,
        (false, false) => BaseStyle::File,
    };
    StyleTag {
        base,
        chosen: is_chosen,
        dimmed: entry.is_hidden && !is_highlighted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str, is_dir: bool) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from("/x").join(name),
            is_dir,
            is_symlink: false,
            is_hidden: name.starts_with('.'),
        }
    }

    #[test]
    fn test_base_style_follows_type_and_cursor() {
        assert_eq!(style(&entry("f", false), false, false).base, BaseStyle::File);
        assert_eq!(style(&entry("d", true), false, false).base, BaseStyle::Directory);
        assert_eq!(style(&entry("f", false), true, false).base, BaseStyle::Highlighted);
        assert_eq!(style(&entry("d", true), true, true).base, BaseStyle::HighlightedDirectory);
    }

    #[test]
    fn test_chosen_overlay() {
        let tag = style(&entry("f", false), true, true);
        assert!(tag.chosen);
        assert!(tag.is_highlighted());
    }

    #[test]
    fn test_hidden_dimmed_unless_highlighted() {
        assert!(style(&entry(".rc", false), false, false).dimmed);
        assert!(!style(&entry(".rc", false), true, false).dimmed);
        assert!(!style(&entry("rc", false), false, false).dimmed);
    }
}
