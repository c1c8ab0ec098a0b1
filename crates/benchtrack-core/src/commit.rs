use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub username: String,
}

/// The code state a benchmark run was measured against.
///
/// Recorded once when the owning entry is appended and never mutated
/// afterwards. A later run against the same commit id (e.g. a revert of a
/// revert) produces a new entry with its own copy of this metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub author: GitUser,
    pub committer: GitUser,
    pub distinct: bool,
    pub id: String,
    pub message: String,
    /// Commit timestamp, kept in the committer's original UTC offset.
    pub timestamp: DateTime<FixedOffset>,
    pub tree_id: String,
    pub url: String,
}
