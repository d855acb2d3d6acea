//! UI components

pub mod list;
pub mod status;
pub mod style;
pub mod theme;

pub use list::{DirectoryView, ListScroll};
pub use status::{HeaderBar, StatusBar};
pub use style::{style, BaseStyle, StyleTag};
pub use theme::{Theme, ThemeConfig};
