//! Entity repository: CRUD over videos and notes.
//!
//! Every operation re-reads the library from the medium, mutates an
//! in-memory copy, and writes it back synchronously before returning.
//! There is no cross-call cache, so independent call sites always see
//! fresh data at the cost of a re-read per operation (the working set
//! is a single user's library, so this is cheap).
//!
//! Store failures propagate unchanged; the repository only adds tracing
//! fields naming the attempted operation.

use std::sync::Arc;

use tracing::debug;

use vidnote_core::{Library, Note, Result, Video};

use crate::medium::StorageMedium;
use crate::store::LibraryStore;

/// CRUD operations over the persisted library.
pub struct LibraryRepository<M: StorageMedium> {
    store: Arc<LibraryStore<M>>,
}

impl<M: StorageMedium> LibraryRepository<M> {
    pub fn new(store: Arc<LibraryStore<M>>) -> Self {
        Self { store }
    }

    /// The underlying store, for composing with search or backup.
    pub fn store(&self) -> &Arc<LibraryStore<M>> {
        &self.store
    }

    /// Insert a video, or replace the existing one with the same id in
    /// place, preserving the collection order of other entries.
    pub fn upsert_video(&self, video: Video) -> Result<()> {
        debug!(component = "repository", op = "upsert_video", video_id = %video.id, "upsert");
        let mut library = self.store.load();
        match library.videos.iter_mut().find(|v| v.id == video.id) {
            Some(existing) => *existing = video,
            None => library.videos.push(video),
        }
        self.store.store(&library)
    }

    /// Delete a video and cascade-delete all of its notes.
    ///
    /// Idempotent: deleting an id with no matching video is a no-op
    /// that still rewrites the (unchanged) library.
    pub fn delete_video(&self, id: &str) -> Result<()> {
        debug!(component = "repository", op = "delete_video", video_id = id, "delete");
        let mut library = self.store.load();
        library.videos.retain(|v| v.id != id);
        library.notes.retain(|n| n.video_id != id);
        self.store.store(&library)
    }

    /// Insert a note, or replace the existing one with the same id.
    ///
    /// No existence check is made against `video_id`: a note created in
    /// a race with a video deletion in another context is stored as an
    /// orphan rather than rejected. The cascade on [`delete_video`]
    /// enforces the integrity invariant in the other direction.
    ///
    /// [`delete_video`]: Self::delete_video
    pub fn upsert_note(&self, note: Note) -> Result<()> {
        debug!(component = "repository", op = "upsert_note", note_id = %note.id, "upsert");
        let mut library = self.store.load();
        match library.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note,
            None => library.notes.push(note),
        }
        self.store.store(&library)
    }

    /// Delete a single note. Idempotent on a missing id.
    pub fn delete_note(&self, id: &str) -> Result<()> {
        debug!(component = "repository", op = "delete_note", note_id = id, "delete");
        let mut library = self.store.load();
        library.notes.retain(|n| n.id != id);
        self.store.store(&library)
    }

    /// All videos, newest first (the default display order).
    pub fn list_videos(&self) -> Vec<Video> {
        let mut videos = self.store.load().videos;
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(
            component = "repository",
            op = "list_videos",
            result_count = videos.len(),
            "list"
        );
        videos
    }

    /// Notes for one video, ordered by playback offset, creation time
    /// as tiebreak.
    pub fn notes_for_video(&self, video_id: &str) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .store
            .load()
            .notes
            .into_iter()
            .filter(|n| n.video_id == video_id)
            .collect();
        notes.sort_by(|a, b| {
            a.timestamp
                .partial_cmp(&b.timestamp)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.created_at.cmp(&b.created_at))
        });
        notes
    }

    /// The whole library as currently persisted.
    pub fn load(&self) -> Library {
        self.store.load()
    }
}
