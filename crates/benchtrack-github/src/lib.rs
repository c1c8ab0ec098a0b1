pub mod event;
pub mod error;

// Re-exports
pub use event::{commit_from_event, read_event, EventRepository, HeadCommit, PushEvent};
pub use error::{Error, Result};
