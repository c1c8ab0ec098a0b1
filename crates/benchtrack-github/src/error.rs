use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Event payload has no head_commit (not a push event?)")]
    MissingHeadCommit,

    #[error("Invalid commit timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("Failed to parse event payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
