//! # Key-Value Storage
//!
//! The saved-calculation history lives in a string-keyed store holding JSON
//! strings, the same shape as browser local storage. [`KeyValueStore`] is
//! the seam; two backends are provided:
//!
//! - [`MemoryStore`] - in-process map, for tests and embedding
//! - [`FileStore`] - one file per key in a directory, with atomic writes and
//!   an exclusive OS lock held across each write or update cycle (native
//!   only)
//!
//! [`KeyValueStore::update`] is the read-modify-write primitive: callers that
//! derive a new value from the old one use it so concurrent writers cannot
//! slip in between the read and the write.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("greeting", "\"hello\"").unwrap();
//! assert_eq!(store.get("greeting").unwrap().as_deref(), Some("\"hello\""));
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{CalcError, CalcResult};

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::{FileStore, DEFAULT_LOCK_TIMEOUT};

/// String-keyed storage of string values.
///
/// Implementations must make `set` atomic per key: a reader sees either the
/// old value or the new one.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> CalcResult<Option<String>>;

    /// Replace the whole value under `key`
    fn set(&self, key: &str, value: &str) -> CalcResult<()>;

    /// Delete `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> CalcResult<()>;

    /// Read-modify-write `key` as one step.
    ///
    /// `f` receives the current value and returns the replacement (`None`
    /// removes the key). A read error or an error from `f` writes nothing.
    /// The default reads and writes separately; backends that can exclude
    /// other writers for the whole cycle override it.
    fn update<F>(&self, key: &str, f: F) -> CalcResult<()>
    where
        F: FnOnce(Option<String>) -> CalcResult<Option<String>>,
    {
        match f(self.get(key)?)? {
            Some(value) => self.set(key, &value),
            None => self.remove(key),
        }
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn entries(&self) -> CalcResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| CalcError::Internal {
            message: "memory store mutex poisoned".to_string(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CalcResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CalcResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn update<F>(&self, key: &str, f: F) -> CalcResult<()>
    where
        F: FnOnce(Option<String>) -> CalcResult<Option<String>>,
    {
        let mut entries = self.entries()?;
        match f(entries.get(key).cloned())? {
            Some(value) => entries.insert(key.to_string(), value),
            None => entries.remove(key),
        };
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> CalcResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> CalcResult<()> {
        (**self).remove(key)
    }

    fn update<F>(&self, key: &str, f: F) -> CalcResult<()>
    where
        F: FnOnce(Option<String>) -> CalcResult<Option<String>>,
    {
        (**self).update(key, f)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::fs::{self, File, OpenOptions};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};
    use std::thread;
    use std::time::{Duration, Instant};

    use fs2::FileExt;

    use super::KeyValueStore;
    use crate::errors::{CalcError, CalcResult};

    /// How long a writer waits for another process to release a key
    pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

    const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(10);

    /// Directory-backed store: key `k` lives in `<dir>/k.json`.
    ///
    /// Writes go to `k.json.tmp`, are synced, then renamed over the
    /// target. Every write, delete, and [`KeyValueStore::update`] cycle
    /// holds an exclusive OS lock on `k.json.lock`, so writers in other
    /// processes (or other `FileStore`s over the same directory) wait their
    /// turn. A writer that cannot get the lock within the timeout gets
    /// `StoreLocked`.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
        lock_timeout: Duration,
    }

    impl FileStore {
        /// Open a store rooted at `dir`, creating the directory if needed.
        pub fn open(dir: impl Into<PathBuf>) -> CalcResult<Self> {
            let dir = dir.into();
            fs::create_dir_all(&dir).map_err(|e| {
                CalcError::storage_error("create dir", dir.display().to_string(), e.to_string())
            })?;
            Ok(FileStore {
                dir,
                lock_timeout: DEFAULT_LOCK_TIMEOUT,
            })
        }

        /// Wait at most `timeout` for a held lock (zero fails immediately).
        pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
            self.lock_timeout = timeout;
            self
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// Path of the file holding `key`
        pub fn path_for(&self, key: &str) -> PathBuf {
            let safe: String = key
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect();
            self.dir.join(format!("{}.json", safe))
        }

        /// Exclusive lock on `key`, released when the returned file drops.
        fn lock(&self, key: &str) -> CalcResult<File> {
            let path = self.path_for(key).with_extension("json.lock");
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)
                .map_err(|e| CalcError::storage_error("create lock", key, e.to_string()))?;

            let deadline = Instant::now() + self.lock_timeout;
            loop {
                match file.try_lock_exclusive() {
                    Ok(()) => return Ok(file),
                    Err(_) if Instant::now() < deadline => thread::sleep(LOCK_RETRY_INTERVAL),
                    Err(_) => {
                        tracing::warn!(key, path = %path.display(), "store key still locked, giving up");
                        return Err(CalcError::StoreLocked {
                            path: path.display().to_string(),
                        });
                    }
                }
            }
        }

        // The `*_locked` helpers assume the caller holds `lock(key)`.

        fn write_locked(&self, key: &str, value: &str) -> CalcResult<()> {
            let path = self.path_for(key);
            let tmp_path = path.with_extension("json.tmp");

            let mut tmp_file = File::create(&tmp_path)
                .map_err(|e| CalcError::storage_error("create temp file", key, e.to_string()))?;
            tmp_file
                .write_all(value.as_bytes())
                .map_err(|e| CalcError::storage_error("write temp file", key, e.to_string()))?;
            tmp_file
                .sync_all()
                .map_err(|e| CalcError::storage_error("sync temp file", key, e.to_string()))?;

            fs::rename(&tmp_path, &path).map_err(|e| {
                let _ = fs::remove_file(&tmp_path);
                CalcError::storage_error("rename to final", key, e.to_string())
            })?;

            tracing::debug!(key, bytes = value.len(), path = %path.display(), "stored value");
            Ok(())
        }

        fn remove_locked(&self, key: &str) -> CalcResult<()> {
            match fs::remove_file(self.path_for(key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(CalcError::storage_error("remove", key, e.to_string())),
            }
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> CalcResult<Option<String>> {
            match fs::read_to_string(self.path_for(key)) {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(CalcError::storage_error("read", key, e.to_string())),
            }
        }

        fn set(&self, key: &str, value: &str) -> CalcResult<()> {
            let _lock = self.lock(key)?;
            self.write_locked(key, value)
        }

        fn remove(&self, key: &str) -> CalcResult<()> {
            let _lock = self.lock(key)?;
            self.remove_locked(key)
        }

        fn update<F>(&self, key: &str, f: F) -> CalcResult<()>
        where
            F: FnOnce(Option<String>) -> CalcResult<Option<String>>,
        {
            let _lock = self.lock(key)?;
            match f(self.get(key)?)? {
                Some(value) => self.write_locked(key, &value),
                None => self.remove_locked(key),
            }
        }
    }

}
