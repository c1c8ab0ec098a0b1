pub mod commit;
pub mod entry;
pub mod store;
pub mod error;

// Re-exports
pub use commit::{CommitInfo, GitUser};
pub use entry::{Bench, Entry};
pub use store::HistoryStore;
pub use error::{Error, Result};
