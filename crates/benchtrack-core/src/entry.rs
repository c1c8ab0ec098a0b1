use crate::{CommitInfo, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One named performance measurement produced by a benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bench {
    /// Test identifier, optionally parameterized (e.g. `suite::test[variant]`).
    pub name: String,
    /// Primary metric, e.g. iterations per second.
    pub value: f64,
    pub unit: String,
    /// Dispersion, e.g. "stddev: 0.115".
    #[serde(default)]
    pub range: String,
    /// Secondary stats, e.g. "mean: 3.82 sec\nrounds: 5".
    #[serde(default)]
    pub extra: String,
}

/// One benchmark execution event: the measured commit, the moment the run
/// was recorded, the measurement harness and its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub commit: CommitInfo,
    /// Recording time in Unix epoch milliseconds. Distinct from the commit
    /// timestamp: a commit can be re-measured long after it was authored.
    pub date: i64,
    /// Tag of the measurement harness, e.g. "pytest".
    pub tool: String,
    pub benches: Vec<Bench>,
}

impl Entry {
    pub fn new(commit: CommitInfo, date: i64, tool: String, benches: Vec<Bench>) -> Self {
        Self {
            commit,
            date,
            tool,
            benches,
        }
    }

    /// Check the entry before it enters history: it must carry a commit id,
    /// at least one bench, and bench names must be unique within the entry.
    pub fn validate(&self) -> Result<()> {
        if self.commit.id.is_empty() {
            return Err(Error::EmptyCommitId);
        }

        if self.benches.is_empty() {
            return Err(Error::NoBenches);
        }

        let mut seen = HashSet::new();
        for bench in &self.benches {
            if !seen.insert(bench.name.as_str()) {
                return Err(Error::DuplicateBenchName(bench.name.clone()));
            }
        }

        Ok(())
    }
}
