//! perch - a single-pane terminal directory browser
//!
//! The library holds the directory-view core (`state`, `fs`, `providers`)
//! and the pieces of the terminal container built around it.

pub mod app;
pub mod config;
pub mod editor;
pub mod errors;
pub mod fs;
pub mod input;
pub mod logging;
pub mod providers;
pub mod state;
pub mod ui;
