//! # vidnote-search
//!
//! Multi-field substring search across a loaded library.
//!
//! A video matches when the lowercased query is a substring of its
//! title, any of its tags, or the content of any note attached to it.
//! The note check is a join by `videoId`; notes are indexed up front so
//! a search is O(videos + notes) rather than O(videos × notes).
//!
//! Search is a read-only consumer of an already-loaded [`Library`]; it
//! does not touch the storage medium.

use std::collections::HashMap;

use tracing::trace;

use vidnote_core::{Library, Note, Video};

/// Find videos matching `query`.
///
/// A blank or whitespace-only query returns every video in stored
/// order. Matching is case-insensitive and uses the query verbatim:
/// surrounding whitespace is significant, so `"rust "` only matches
/// fields containing `"rust "` with the trailing space. No result
/// ordering is guaranteed beyond the library's stored order; callers
/// wanting the default display order apply [`sort_newest_first`].
pub fn search_library<'a>(query: &str, library: &'a Library) -> Vec<&'a Video> {
    if query.trim().is_empty() {
        return library.videos.iter().collect();
    }
    let needle = query.to_lowercase();

    let notes_by_video = index_notes(&library.notes);

    let results: Vec<&Video> = library
        .videos
        .iter()
        .filter(|video| {
            matches_video(video, &needle)
                || notes_by_video
                    .get(video.id.as_str())
                    .is_some_and(|notes| {
                        notes
                            .iter()
                            .any(|note| note.content.to_lowercase().contains(&needle))
                    })
        })
        .inspect(|video| trace!(query = %needle, video_id = %video.id, "search hit"))
        .collect();

    tracing::debug!(
        component = "search",
        op = "search",
        query = %needle,
        result_count = results.len(),
        "search complete"
    );
    results
}

/// Sort search results into the default display order, newest first.
pub fn sort_newest_first(videos: &mut [&Video]) {
    videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn matches_video(video: &Video, needle: &str) -> bool {
    video.title.to_lowercase().contains(needle)
        || video.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

fn index_notes(notes: &[Note]) -> HashMap<&str, Vec<&Note>> {
    let mut index: HashMap<&str, Vec<&Note>> = HashMap::new();
    for note in notes {
        index.entry(note.video_id.as_str()).or_default().push(note);
    }
    index
}
