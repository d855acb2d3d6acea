//! Filesystem module

pub mod entry;
pub mod metadata;
pub mod ops;
pub mod utils;

pub use entry::Entry;
pub use metadata::EntryMetadata;
pub use ops::read_directory;
pub use utils::RemovalReport;
