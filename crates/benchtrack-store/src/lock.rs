use crate::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_ATTEMPTS: u32 = 50;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Scoped exclusive lock over a store file.
///
/// Two CI jobs racing to append would otherwise lose one update: both load
/// the same history, both save, last writer wins. The lock is a sibling
/// `.lock` file created with create-new semantics, so acquisition is atomic
/// on any filesystem, and it is removed again on drop, on every exit path.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    /// Acquire the lock for a store file, retrying briefly if another
    /// process holds it.
    pub fn acquire(store_path: &Path) -> Result<Self> {
        Self::acquire_with_retry(store_path, DEFAULT_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }

    pub fn acquire_with_retry(store_path: &Path, attempts: u32, delay: Duration) -> Result<Self> {
        let path = lock_path(store_path);

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        for attempt in 0..attempts {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    // Best effort: record the holder for debugging a stale lock
                    let _ = write!(file, "{}", std::process::id());

                    debug!(lock = %path.display(), "Acquired store lock");
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(
                        lock = %path.display(),
                        attempt,
                        "Store lock held, retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::LockHeld(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "Failed to remove store lock");
        } else {
            debug!(lock = %self.path.display(), "Released store lock");
        }
    }
}

fn lock_path(store_path: &Path) -> PathBuf {
    let mut name = store_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    store_path.with_file_name(name)
}
