pub mod directory;
pub mod events;
pub mod filter;

pub use directory::{DeleteSummary, DirectoryState};
pub use events::DirectoryEvent;
pub use filter::Filter;
