use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { key: String, needed: u64, quota: u64 },
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// A durable string-to-string store, one value per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// Stores each key as a file of the same name inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    /// Upper bound on the summed size of all values (None = unlimited)
    quota: Option<u64>,
    /// Set when the directory could not be created at open time
    unavailable: Option<String>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`. Never fails: a store
    /// whose directory can't be created reports `Unavailable` on every call.
    pub fn open(dir: impl Into<PathBuf>, quota: Option<u64>) -> Self {
        let dir = dir.into();
        let unavailable = fs::create_dir_all(&dir)
            .err()
            .map(|e| format!("{}: {}", dir.display(), e));
        FileStore {
            dir,
            quota: quota.filter(|q| *q > 0),
            unavailable,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match &self.unavailable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Total bytes currently stored, excluding `skip_key`
    fn used_bytes_excluding(&self, skip_key: &str) -> Result<u64, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            source: e,
        })?;
        let mut total = 0;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == skip_key || validate_key(&name).is_err() {
                continue;
            }
            if let Ok(meta) = entry.metadata()
                && meta.is_file()
            {
                total += meta.len();
            }
        }
        Ok(total)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        self.check_available()?;
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.check_available()?;
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_excluding(key)? + value.len() as u64;
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        let path = self.key_path(key);
        atomic_write(&path, value.as_bytes()).map_err(|e| StoreError::Io { path, source: e })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.check_available()?;
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io { path, source: e }),
        }
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Map-backed store for tests. Can be disabled or given a quota to stand in
/// for a browser store that refuses writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<u64>,
    disabled: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses every operation, like a browser with storage turned off
    pub fn disabled() -> Self {
        MemoryStore {
            disabled: true,
            ..Default::default()
        }
    }

    pub fn with_quota(quota: u64) -> Self {
        MemoryStore {
            quota: Some(quota),
            ..Default::default()
        }
    }

    /// Seed a raw value, bypassing quota checks
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn check_enabled(&self) -> Result<(), StoreError> {
        if self.disabled {
            Err(StoreError::Unavailable("storage is disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        self.check_enabled()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.check_enabled()?;
        if let Some(quota) = self.quota {
            let others: u64 = self
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len() as u64)
                .sum();
            let needed = others + value.len() as u64;
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.check_enabled()?;
        self.entries.remove(key);
        Ok(())
    }
}
