//! Storage medium abstraction.
//!
//! The persisted library lives under a single key in a small local
//! key/value store. [`StorageMedium`] is the seam between the store
//! logic and that medium, so tests substitute [`MemoryMedium`] and the
//! application wires up [`FileMedium`].
//!
//! Mediums are size-constrained: writes past the configured quota fail
//! with [`Error::QuotaExceeded`], the one failure a user can act on.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

use vidnote_core::{Error, Result};

/// Default byte quota, matching the localStorage ceiling the original
/// deployment ran under.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Synchronous key/value medium holding UTF-8 string values.
///
/// All operations complete in-process; the medium serializes access
/// within one execution context. A foreign context (another process
/// sharing the same backing store) may rewrite values between calls.
pub trait StorageMedium: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any prior value whole.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory medium for tests and ephemeral sessions.
pub struct MemoryMedium {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: None,
        }
    }

    /// A medium that rejects any single value larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock means a panic mid-insert on a HashMap of
        // Strings; the map itself is still coherent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(Error::QuotaExceeded);
            }
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// File-backed medium: one file per key under a base directory.
///
/// Writes are whole-document atomic (temp file + rename), so a reader
/// observes either the old value or the new one, never a mix. A full
/// disk (`ENOSPC`) surfaces as [`Error::QuotaExceeded`] just like the
/// configured quota; any other I/O failure is a generic storage error.
pub struct FileMedium {
    base_dir: PathBuf,
    quota_bytes: usize,
}

impl FileMedium {
    /// Create a medium rooted at `base_dir` with the default quota.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_quota(base_dir, DEFAULT_QUOTA_BYTES)
    }

    /// Create a medium with an explicit per-value byte quota.
    pub fn with_quota(base_dir: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self {
            base_dir: base_dir.into(),
            quota_bytes,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl StorageMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("read {}: {}", key, e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if value.len() > self.quota_bytes {
            warn!(
                key,
                payload_bytes = value.len(),
                quota_bytes = self.quota_bytes,
                "write exceeds quota"
            );
            return Err(Error::QuotaExceeded);
        }

        fs::create_dir_all(&self.base_dir)
            .map_err(|e| Error::Storage(format!("create_dir_all: {}", e)))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, &path)
        })();

        match write_result {
            Ok(()) => {
                debug!(key, payload_bytes = value.len(), "medium write");
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(&temp_path);
                match e.kind() {
                    ErrorKind::StorageFull => Err(Error::QuotaExceeded),
                    _ => Err(Error::Storage(format!("write {}: {}", key, e))),
                }
            }
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!("remove {}: {}", key, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_medium_get_set_remove() {
        let medium = MemoryMedium::new();
        assert_eq!(medium.get("k").unwrap(), None);
        medium.set("k", "value").unwrap();
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("value"));
        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);
        // Removing an absent key is fine.
        medium.remove("k").unwrap();
    }

    #[test]
    fn test_memory_medium_quota() {
        let medium = MemoryMedium::with_quota(8);
        medium.set("k", "12345678").unwrap();
        let err = medium.set("k", "123456789").unwrap_err();
        assert!(matches!(err, Error::QuotaExceeded));
        // The prior value survives the rejected write.
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("12345678"));
    }

    #[test]
    fn test_file_medium_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path());
        assert_eq!(medium.get("library").unwrap(), None);
        medium.set("library", r#"{"videos":[],"notes":[]}"#).unwrap();
        assert_eq!(
            medium.get("library").unwrap().as_deref(),
            Some(r#"{"videos":[],"notes":[]}"#)
        );
    }

    #[test]
    fn test_file_medium_overwrite_is_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path());
        medium.set("library", "first value, quite long").unwrap();
        medium.set("library", "second").unwrap();
        assert_eq!(medium.get("library").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_file_medium_quota_keeps_prior_value() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::with_quota(dir.path(), 16);
        medium.set("library", "small").unwrap();
        let err = medium.set("library", &"x".repeat(17)).unwrap_err();
        assert!(matches!(err, Error::QuotaExceeded));
        assert_eq!(medium.get("library").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_file_medium_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path());
        medium.remove("library").unwrap();
    }
}
