//! Structured logging field name constants for VidNote Vault.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log tooling can query by the same names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Write failed and was surfaced to the caller |
//! | WARN  | Recoverable issue, fallback applied (corrupt read) |
//! | INFO  | Lifecycle events |
//! | DEBUG | Decision points, operation completions |
//! | TRACE | Per-item iteration (search hits) |

/// Component within the library. Values: "store", "repository", "search", "youtube".
pub const COMPONENT: &str = "component";

/// Logical operation name. Examples: "load", "store", "replace", "upsert_video".
pub const OPERATION: &str = "op";

/// Video id being operated on.
pub const VIDEO_ID: &str = "video_id";

/// Note id being operated on.
pub const NOTE_ID: &str = "note_id";

/// Search query text.
pub const QUERY: &str = "query";

/// Number of results returned by a search or list.
pub const RESULT_COUNT: &str = "result_count";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Byte length of a serialized library document.
pub const PAYLOAD_BYTES: &str = "payload_bytes";
