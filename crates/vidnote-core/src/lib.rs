//! # vidnote-core
//!
//! Core types, errors, and abstractions for the VidNote Vault library.
//!
//! This crate provides the domain models (videos, timestamped notes, and
//! the library document that holds both), the shared error taxonomy, the
//! schema validator guarding the trust boundary, and the event bus used
//! to signal library changes to independent observers.

pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod schema;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use events::{EventBus, LibraryEvent};
pub use models::{Library, Note, Video};
pub use schema::{validate_library, SchemaError, SchemaViolation};
