use crate::{Entry, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Append-only aggregate of all benchmark history: per-suite entry
/// sequences plus the most recent recording time.
///
/// Entries within a suite are ordered by ascending `date`. Historical
/// entries are never reordered, mutated or removed by `append`; every
/// mutation either fully applies or leaves the store unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStore {
    /// Epoch milliseconds of the most recently recorded entry across all
    /// suites. Zero for a store with no history yet.
    pub last_update: i64,
    pub repo_url: String,
    pub entries: BTreeMap<String, Vec<Entry>>,
}

impl HistoryStore {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            last_update: 0,
            repo_url: repo_url.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Append an entry to the named suite, creating the suite on first use.
    ///
    /// The entry's `date` must not precede the date of the suite's current
    /// newest entry; a late arrival fails with `OutOfOrderEntry` and the
    /// store is left untouched. Equal dates are accepted (two runs recorded
    /// within the same millisecond).
    pub fn append(&mut self, suite: &str, entry: Entry) -> Result<()> {
        entry.validate()?;

        if let Some(last_date) = self.last_date(suite) {
            if entry.date < last_date {
                return Err(Error::OutOfOrderEntry {
                    suite: suite.to_string(),
                    last_date,
                    date: entry.date,
                });
            }
        }

        tracing::debug!(
            suite,
            commit = %entry.commit.id,
            date = entry.date,
            benches = entry.benches.len(),
            "Appending entry"
        );

        self.last_update = self.last_update.max(entry.date);
        self.entries.entry(suite.to_string()).or_default().push(entry);

        Ok(())
    }

    /// Force-insert a late-arriving entry at its date-sorted position.
    ///
    /// Plain `append` rejects entries older than the suite's newest; this
    /// is the explicit alternative for callers that prefer to keep a late
    /// run rather than discard it. Already-recorded entries keep their
    /// relative order (insertion goes after any equal dates).
    pub fn insert_sorted(&mut self, suite: &str, entry: Entry) -> Result<()> {
        entry.validate()?;

        tracing::debug!(
            suite,
            commit = %entry.commit.id,
            date = entry.date,
            "Inserting entry at date-sorted position"
        );

        self.last_update = self.last_update.max(entry.date);
        let suite_entries = self.entries.entry(suite.to_string()).or_default();
        let position = suite_entries.partition_point(|e| e.date <= entry.date);
        suite_entries.insert(position, entry);

        Ok(())
    }

    /// Keep only the newest `max_entries` entries of a suite.
    ///
    /// Retention is opt-in; history is unbounded by default. Returns the
    /// number of entries dropped.
    pub fn truncate(&mut self, suite: &str, max_entries: usize) -> usize {
        let Some(suite_entries) = self.entries.get_mut(suite) else {
            return 0;
        };

        if suite_entries.len() <= max_entries {
            return 0;
        }

        let excess = suite_entries.len() - max_entries;
        suite_entries.drain(..excess);

        tracing::info!(suite, dropped = excess, kept = max_entries, "Truncated suite history");

        excess
    }

    /// Entries of the named suite, oldest first.
    pub fn suite(&self, name: &str) -> Option<&[Entry]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn suite_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Total number of entries across all suites.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Date of the suite's newest entry, if the suite has any history.
    fn last_date(&self, suite: &str) -> Option<i64> {
        self.entries
            .get(suite)
            .and_then(|entries| entries.last())
            .map(|entry| entry.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bench, CommitInfo, GitUser};
    use chrono::DateTime;

    fn test_commit(id: &str) -> CommitInfo {
        CommitInfo {
            author: GitUser {
                email: "jane@example.com".to_string(),
                name: "Jane Doe".to_string(),
                username: "janedoe".to_string(),
            },
            committer: GitUser {
                email: "noreply@github.com".to_string(),
                name: "GitHub".to_string(),
                username: "web-flow".to_string(),
            },
            distinct: true,
            id: id.to_string(),
            message: format!("Commit {}", id),
            timestamp: DateTime::parse_from_rfc3339("2025-03-18T21:20:35+01:00").unwrap(),
            tree_id: "727c6dd830919de3b93ae81f79feacfe76d6d62e".to_string(),
            url: format!("https://github.com/example/repo/commit/{}", id),
        }
    }

    fn test_entry(id: &str, date: i64) -> Entry {
        Entry::new(
            test_commit(id),
            date,
            "pytest".to_string(),
            vec![Bench {
                name: "t".to_string(),
                value: 1.0,
                unit: "iter/sec".to_string(),
                range: String::new(),
                extra: String::new(),
            }],
        )
    }

    #[test]
    fn test_append_preserves_call_order() {
        let mut store = HistoryStore::new("https://github.com/example/repo");

        store.append("S", test_entry("a", 1000)).unwrap();
        store.append("S", test_entry("b", 2000)).unwrap();
        store.append("S", test_entry("c", 3000)).unwrap();

        let suite = store.suite("S").unwrap();
        let ids: Vec<&str> = suite.iter().map(|e| e.commit.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_first_append_creates_suite() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        assert!(store.suite("S").is_none());

        store.append("S", test_entry("a", 1000)).unwrap();

        assert_eq!(store.suite("S").unwrap().len(), 1);
        assert_eq!(store.last_update, 1000);
    }

    #[test]
    fn test_last_update_is_max_across_suites() {
        let mut store = HistoryStore::new("https://github.com/example/repo");

        store.append("S1", test_entry("a", 1000)).unwrap();
        store.append("S2", test_entry("b", 5000)).unwrap();
        // S1 accepts 3000 (its own last is 1000) but last_update stays at 5000
        store.append("S1", test_entry("c", 3000)).unwrap();

        assert_eq!(store.last_update, 5000);
        assert_eq!(store.entry_count(), 3);
    }

    #[test]
    fn test_out_of_order_append_leaves_store_unchanged() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        store.append("S", test_entry("a", 1000)).unwrap();
        store.append("S", test_entry("b", 2000)).unwrap();

        let before = store.clone();
        let result = store.append("S", test_entry("c", 1500));

        match result {
            Err(Error::OutOfOrderEntry {
                suite,
                last_date,
                date,
            }) => {
                assert_eq!(suite, "S");
                assert_eq!(last_date, 2000);
                assert_eq!(date, 1500);
            }
            other => panic!("expected OutOfOrderEntry, got {:?}", other),
        }

        assert_eq!(store, before);
        assert_eq!(store.last_update, 2000);
    }

    #[test]
    fn test_equal_dates_accepted() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        store.append("S", test_entry("a", 1000)).unwrap();
        store.append("S", test_entry("b", 1000)).unwrap();

        assert_eq!(store.suite("S").unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_entry_leaves_store_unchanged() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        store.append("S", test_entry("a", 1000)).unwrap();

        let before = store.clone();
        let mut entry = test_entry("b", 2000);
        entry.benches.push(entry.benches[0].clone());

        assert!(matches!(
            store.append("S", entry),
            Err(Error::DuplicateBenchName(_))
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remeasured_commit_recorded_as_new_entry() {
        let mut store = HistoryStore::new("https://github.com/example/repo");

        store.append("S", test_entry("abc", 1000)).unwrap();
        store.append("S", test_entry("abc", 2000)).unwrap();

        let suite = store.suite("S").unwrap();
        assert_eq!(suite.len(), 2);
        assert_eq!(suite[0].commit.id, suite[1].commit.id);
        assert_ne!(suite[0].date, suite[1].date);
    }

    #[test]
    fn test_insert_sorted_places_late_entry() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        store.append("S", test_entry("a", 1000)).unwrap();
        store.append("S", test_entry("b", 3000)).unwrap();

        store.insert_sorted("S", test_entry("c", 2000)).unwrap();

        let dates: Vec<i64> = store.suite("S").unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![1000, 2000, 3000]);
        assert_eq!(store.last_update, 3000);
    }

    #[test]
    fn test_truncate_keeps_newest() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        for (i, date) in [1000, 2000, 3000, 4000].iter().enumerate() {
            store.append("S", test_entry(&format!("c{}", i), *date)).unwrap();
        }

        let dropped = store.truncate("S", 2);

        assert_eq!(dropped, 2);
        let dates: Vec<i64> = store.suite("S").unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![3000, 4000]);
    }

    #[test]
    fn test_truncate_noop_when_under_cap() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        store.append("S", test_entry("a", 1000)).unwrap();

        assert_eq!(store.truncate("S", 10), 0);
        assert_eq!(store.truncate("missing", 10), 0);
        assert_eq!(store.suite("S").unwrap().len(), 1);
    }

    // The worked example: A(1000), B(2000), then C(1500) must fail and
    // leave the store at [A, B] with last_update 2000.
    #[test]
    fn test_append_sequence_example() {
        let mut store = HistoryStore::new("https://github.com/example/repo");

        store.append("S", test_entry("A", 1000)).unwrap();
        store.append("S", test_entry("B", 2000)).unwrap();
        assert_eq!(store.last_update, 2000);
        assert_eq!(store.suite("S").unwrap().len(), 2);

        assert!(store.append("S", test_entry("C", 1500)).is_err());

        let ids: Vec<&str> = store
            .suite("S")
            .unwrap()
            .iter()
            .map(|e| e.commit.id.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(store.last_update, 2000);
    }

    #[test]
    fn test_serialized_field_names_match_persisted_form() {
        let mut store = HistoryStore::new("https://github.com/example/repo");
        store.append("S", test_entry("a", 1000)).unwrap();

        let json = serde_json::to_value(&store).unwrap();
        assert!(json.get("lastUpdate").is_some());
        assert!(json.get("repoUrl").is_some());
        assert!(json["entries"]["S"][0]["commit"].get("tree_id").is_some());
    }
}
