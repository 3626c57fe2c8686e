//! Whole-document library store over a [`StorageMedium`].
//!
//! The entire library is serialized under one fixed key and rewritten
//! on every mutation. Reads fail open: missing, unparseable, or invalid
//! data all become the empty library, logged but never surfaced, so a
//! corrupt value can never wedge the application. Writes fail closed
//! with typed errors.
//!
//! Concurrency: a foreign context sharing the medium may rewrite the
//! value between our load and store. Semantics are last-writer-wins,
//! with no merge and no optimistic token. The store keeps a fingerprint
//! of the last value it wrote and emits [`LibraryEvent::StorageChanged`]
//! when a load observes a value it did not write, which is the
//! best-effort cross-context notification observers refresh on.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use vidnote_core::{validate_library, Error, EventBus, Library, LibraryEvent, Result};

use crate::medium::StorageMedium;

/// Fixed, versionless storage key for the library document.
pub const STORAGE_KEY: &str = "vidnote-vault-library";

/// Load/store/replace over the single persisted library document.
pub struct LibraryStore<M: StorageMedium> {
    medium: M,
    events: Arc<EventBus>,
    /// Fingerprint of the last raw value this store wrote.
    last_written: Mutex<Option<String>>,
}

impl<M: StorageMedium> LibraryStore<M> {
    pub fn new(medium: M, events: Arc<EventBus>) -> Self {
        Self {
            medium,
            events,
            last_written: Mutex::new(None),
        }
    }

    /// The event bus this store signals changes on.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    fn fingerprint(raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Read the current library.
    ///
    /// Never fails: a missing value is an empty library, and a present
    /// but unparseable or schema-invalid value is recovered to the
    /// empty library with a warning. Corrupt state is self-healing (the
    /// next store overwrites it) rather than a blocking error.
    pub fn load(&self) -> Library {
        let raw = match self.medium.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Library::empty(),
            Err(e) => {
                warn!(component = "store", op = "load", error = %e, "medium read failed");
                return Library::empty();
            }
        };

        self.detect_foreign_write(&raw);

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(component = "store", op = "load", error = %e, "stored value is not JSON");
                return Library::empty();
            }
        };

        match validate_library(&parsed) {
            Ok(library) => library,
            Err(e) => {
                warn!(component = "store", op = "load", error = %e, "stored value failed validation");
                Library::empty()
            }
        }
    }

    /// Serialize and write the full library, replacing any prior value.
    ///
    /// Emits [`LibraryEvent::LibraryUpdated`] on success. Quota
    /// rejection surfaces as [`Error::QuotaExceeded`]; any other write
    /// failure as [`Error::Storage`]. A failed write never partially
    /// applies, the medium holds either the old document or the new one.
    pub fn store(&self, library: &Library) -> Result<()> {
        let raw = serde_json::to_string(library)?;
        debug!(
            component = "store",
            op = "store",
            payload_bytes = raw.len(),
            "writing library"
        );
        self.medium.set(STORAGE_KEY, &raw)?;

        *self.lock_last_written() = Some(Self::fingerprint(&raw));
        self.events.emit(LibraryEvent::LibraryUpdated {
            videos: library.videos.len(),
            notes: library.notes.len(),
        });
        Ok(())
    }

    /// Validate an untrusted payload and replace the stored library.
    ///
    /// All-or-nothing: a payload failing validation fails with
    /// [`Error::InvalidFormat`] and performs no write, so a bad import
    /// can never partially overwrite good data.
    pub fn replace(&self, raw: Value) -> Result<()> {
        let library = validate_library(&raw).map_err(Error::InvalidFormat)?;
        self.store(&library)
    }

    /// Replace the stored library with the empty one.
    pub fn clear(&self) -> Result<()> {
        self.store(&Library::empty())
    }

    fn detect_foreign_write(&self, raw: &str) {
        let mut last = self.lock_last_written();
        if let Some(previous) = last.as_ref() {
            let current = Self::fingerprint(raw);
            if *previous != current {
                debug!(component = "store", op = "load", "foreign write detected");
                self.events.emit(LibraryEvent::StorageChanged);
                // Remember what we observed so the signal fires once
                // per foreign write, not on every subsequent load.
                *last = Some(current);
            }
        }
    }

    fn lock_last_written(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.last_written.lock().unwrap_or_else(|e| e.into_inner())
    }
}
