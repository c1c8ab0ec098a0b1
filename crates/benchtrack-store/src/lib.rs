pub mod file_store;
pub mod format;
pub mod lock;
pub mod error;

// Re-exports
pub use file_store::FileStore;
pub use format::StoreFormat;
pub use lock::LockFile;
pub use error::{Error, Result};
