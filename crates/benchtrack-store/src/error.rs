use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("History file is corrupt: {0}")]
    CorruptHistory(String),

    #[error("No prior history at {}", .0.display())]
    EmptyHistory(PathBuf),

    #[error("History file is locked by another process: {}", .0.display())]
    LockHeld(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::CorruptHistory(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
