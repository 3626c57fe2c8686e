//! Core data models for VidNote Vault.
//!
//! These types are shared across all vidnote crates and represent the
//! persisted domain entities. Field names serialize in camelCase so the
//! on-disk JSON matches the layout the application has always written.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds since the Unix epoch, the persisted timestamp form.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate a fresh entity id. Ids are opaque strings; UUIDv4 in practice.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// One user-added video reference.
///
/// `id`, `youtube_id`, `url`, and `created_at` are immutable after
/// creation; the edit flow only touches `title` and `tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    /// Provider-side identifier, the 11-character token from the URL.
    pub youtube_id: String,
    pub title: String,
    /// Original URL as the user entered it.
    pub url: String,
    /// Ordered free-text tags. Duplicates are screened at input time by
    /// the tag editor; the repository stores whatever it is given.
    pub tags: Vec<String>,
    /// Creation time in epoch milliseconds. Default sort key, newest first.
    pub created_at: i64,
}

impl Video {
    /// Create a video with a generated id and the current timestamp.
    pub fn new(
        youtube_id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: new_id(),
            youtube_id: youtube_id.into(),
            title: title.into(),
            url: url.into(),
            tags,
            created_at: now_millis(),
        }
    }
}

/// One timestamped annotation attached to exactly one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    /// Id of the video this note annotates. Not enforced as a foreign
    /// key on write; see `LibraryRepository::upsert_note`.
    pub video_id: String,
    /// Playback offset in seconds. Fractional values are legal.
    pub timestamp: f64,
    pub content: String,
    /// Creation time in epoch milliseconds, used as an ordering tiebreak.
    pub created_at: i64,
}

impl Note {
    /// Create a note with a generated id and the current timestamp.
    pub fn new(video_id: impl Into<String>, timestamp: f64, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            video_id: video_id.into(),
            timestamp,
            content: content.into(),
            created_at: now_millis(),
        }
    }
}

/// The complete persisted dataset: the unit of storage.
///
/// The library is always read and written whole; there is no partial
/// update at the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub videos: Vec<Video>,
    pub notes: Vec<Note>,
}

impl Library {
    /// An empty library, the fail-safe default for unreadable state.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_new_generates_unique_ids() {
        let a = Video::new("dQw4w9WgXcQ", "A", "https://youtu.be/dQw4w9WgXcQ", vec![]);
        let b = Video::new("dQw4w9WgXcQ", "B", "https://youtu.be/dQw4w9WgXcQ", vec![]);
        assert_ne!(a.id, b.id);
        assert!(a.created_at > 0);
    }

    #[test]
    fn test_video_serializes_camel_case() {
        let video = Video {
            id: "v1".to_string(),
            youtube_id: "dQw4w9WgXcQ".to_string(),
            title: "Test".to_string(),
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            tags: vec!["music".to_string()],
            created_at: 1700000000000,
        };
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["youtubeId"], "dQw4w9WgXcQ");
        assert_eq!(json["createdAt"], 1700000000000i64);
        assert!(json.get("youtube_id").is_none());
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note {
            id: "n1".to_string(),
            video_id: "v1".to_string(),
            timestamp: 12.5,
            content: "intro".to_string(),
            created_at: 1700000000000,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["videoId"], "v1");
        assert_eq!(json["timestamp"], 12.5);
    }

    #[test]
    fn test_library_round_trips_through_json() {
        let library = Library {
            videos: vec![Video::new("abcdefghijk", "T", "u", vec!["t".into()])],
            notes: vec![Note::new("v1", 3.0, "c")],
        };
        let json = serde_json::to_string(&library).unwrap();
        let back: Library = serde_json::from_str(&json).unwrap();
        assert_eq!(back, library);
    }

    #[test]
    fn test_empty_library() {
        let library = Library::empty();
        assert!(library.is_empty());
        assert_eq!(
            serde_json::to_string(&library).unwrap(),
            r#"{"videos":[],"notes":[]}"#
        );
    }
}
