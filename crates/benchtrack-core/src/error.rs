use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Out-of-order entry for suite '{suite}': date {date} precedes last recorded date {last_date}")]
    OutOfOrderEntry {
        suite: String,
        last_date: i64,
        date: i64,
    },

    #[error("Duplicate bench name within entry: {0}")]
    DuplicateBenchName(String),

    #[error("Entry has an empty commit id")]
    EmptyCommitId,

    #[error("Entry has no benches")]
    NoBenches,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
