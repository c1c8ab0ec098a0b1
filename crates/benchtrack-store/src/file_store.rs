use crate::{Error, Result, StoreFormat};
use benchtrack_core::HistoryStore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed persistence for a `HistoryStore`.
///
/// Saves are all-or-nothing: the serialized store is written to a temporary
/// file in the target directory and renamed over the target, so a reader
/// only ever observes the previous or the new history, never a partial
/// write. Exclusive access across processes is the caller's job via
/// `LockFile`, held around the whole load-append-save sequence.
pub struct FileStore {
    path: PathBuf,
    format: StoreFormat,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: StoreFormat::default(),
        }
    }

    pub fn with_format(mut self, format: StoreFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted store.
    ///
    /// An absent or empty file is the valid "no prior history" state and
    /// reports `EmptyHistory`; anything unparseable reports
    /// `CorruptHistory`. The caller can always tell the two apart.
    pub fn load(&self) -> Result<HistoryStore> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::EmptyHistory(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Err(Error::EmptyHistory(self.path.clone()));
        }

        let json = StoreFormat::strip(&content)?;
        let store: HistoryStore = serde_json::from_str(json)?;

        debug!(
            path = %self.path.display(),
            suites = store.suite_names().count(),
            entries = store.entry_count(),
            "Loaded history store"
        );

        Ok(store)
    }

    /// Load the persisted store, or start a fresh one when no history
    /// exists yet. A corrupt file still fails: overwriting it would destroy
    /// the historical record.
    pub fn load_or_default(&self, repo_url: &str) -> Result<HistoryStore> {
        match self.load() {
            Ok(store) => Ok(store),
            Err(Error::EmptyHistory(_)) => {
                info!(path = %self.path.display(), "No prior history, starting a fresh store");
                Ok(HistoryStore::new(repo_url))
            }
            Err(e) => Err(e),
        }
    }

    /// Serialize and atomically replace the persisted store.
    pub fn save(&self, store: &HistoryStore) -> Result<()> {
        let json = serde_json::to_string_pretty(store)
            .map_err(|e| Error::Other(anyhow::anyhow!("failed to serialize store: {}", e)))?;
        let content = self.format.wrap(&json);

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        debug!(
            path = %self.path.display(),
            entries = store.entry_count(),
            last_update = store.last_update,
            "Saved history store"
        );

        Ok(())
    }
}
