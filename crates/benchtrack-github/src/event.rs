use crate::{Error, Result};
use benchtrack_core::{CommitInfo, GitUser};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The slice of a GitHub push-event payload the ingestion step needs:
/// `head_commit` carries exactly the commit metadata recorded next to each
/// benchmark run, `repository` supplies the repo URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEvent {
    pub head_commit: Option<HeadCommit>,
    pub repository: Option<EventRepository>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadCommit {
    pub id: String,
    pub tree_id: String,
    #[serde(default)]
    pub distinct: bool,
    pub message: String,
    /// ISO-8601 with the committer's UTC offset, e.g. `2025-03-18T21:20:35+01:00`.
    pub timestamp: String,
    pub url: String,
    pub author: CommitUser,
    pub committer: CommitUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRepository {
    pub full_name: String,
    pub html_url: String,
}

impl From<CommitUser> for GitUser {
    fn from(user: CommitUser) -> Self {
        GitUser {
            email: user.email,
            name: user.name,
            username: user.username,
        }
    }
}

/// Map a push event's head commit onto the store's commit metadata.
pub fn commit_from_event(event: &PushEvent) -> Result<CommitInfo> {
    let head = event
        .head_commit
        .as_ref()
        .ok_or(Error::MissingHeadCommit)?;

    let timestamp = DateTime::parse_from_rfc3339(&head.timestamp)?;

    Ok(CommitInfo {
        author: head.author.clone().into(),
        committer: head.committer.clone().into(),
        distinct: head.distinct,
        id: head.id.clone(),
        message: head.message.clone(),
        timestamp,
        tree_id: head.tree_id.clone(),
        url: head.url.clone(),
    })
}

/// Read a `GITHUB_EVENT_PATH`-style payload file and extract the commit
/// metadata plus the repository URL, when the payload carries one.
pub fn read_event(path: &Path) -> Result<(CommitInfo, Option<String>)> {
    debug!(path = %path.display(), "Reading GitHub event payload");

    let payload = std::fs::read_to_string(path)?;
    let event: PushEvent = serde_json::from_str(&payload)?;

    let commit = commit_from_event(&event)?;
    let repo_url = event.repository.map(|repo| repo.html_url);

    Ok((commit, repo_url))
}
