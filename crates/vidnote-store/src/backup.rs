//! Backup export and import.
//!
//! Exports write the same JSON shape the medium holds, pretty-printed
//! for human inspection. Imports pass through [`LibraryStore::replace`],
//! so a malformed backup is rejected whole with no partial write.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use vidnote_core::{Error, Library, Result};

use crate::medium::StorageMedium;
use crate::store::LibraryStore;

/// Serialize a library as the pretty-printed backup document.
pub fn export_json(library: &Library) -> Result<String> {
    Ok(serde_json::to_string_pretty(library)?)
}

/// Backup filename for the given date: `vidnote-vault-backup-<YYYY-MM-DD>.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("vidnote-vault-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Export the currently persisted library to a file.
pub fn export_to_file<M: StorageMedium>(
    store: &LibraryStore<M>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let library = store.load();
    let json = export_json(&library)?;
    fs::write(path.as_ref(), json)?;
    debug!(
        component = "store",
        op = "export",
        video_count = library.videos.len(),
        note_count = library.notes.len(),
        "exported library"
    );
    Ok(())
}

/// Import a backup payload, replacing the stored library.
///
/// A payload that is not JSON at all is rejected the same way as one
/// with the wrong shape: [`Error::InvalidFormat`], nothing written.
pub fn import_json<M: StorageMedium>(store: &LibraryStore<M>, payload: &str) -> Result<()> {
    let raw: Value = serde_json::from_str(payload).map_err(|e| {
        Error::InvalidFormat(vidnote_core::SchemaError {
            violations: vec![vidnote_core::SchemaViolation {
                path: "$".to_string(),
                message: format!("not valid JSON: {}", e),
            }],
        })
    })?;
    store.replace(raw)
}

/// Import a backup file from disk.
pub fn import_from_file<M: StorageMedium>(
    store: &LibraryStore<M>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let payload = fs::read_to_string(path.as_ref())?;
    import_json(store, &payload)
}
