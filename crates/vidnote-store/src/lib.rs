//! # vidnote-store
//!
//! Local persistence layer for VidNote Vault.
//!
//! This crate provides:
//! - The [`StorageMedium`] seam over the single-key local store, with
//!   file-backed and in-memory implementations
//! - [`LibraryStore`]: whole-document load/store/replace with fail-open
//!   reads, typed write errors, and change signaling
//! - [`LibraryRepository`]: CRUD over videos and notes with cascade
//!   delete
//! - Backup export and import
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vidnote_core::{EventBus, Video};
//! use vidnote_store::{FileMedium, LibraryRepository, LibraryStore};
//!
//! let medium = FileMedium::new("/home/me/.vidnote");
//! let store = Arc::new(LibraryStore::new(medium, Arc::new(EventBus::default())));
//! let repo = LibraryRepository::new(store);
//!
//! repo.upsert_video(Video::new("dQw4w9WgXcQ", "Never", "https://youtu.be/dQw4w9WgXcQ", vec![]))?;
//! ```

pub mod backup;
pub mod medium;
pub mod repository;
pub mod store;

// Re-export core types
pub use vidnote_core::{Error, EventBus, Library, LibraryEvent, Note, Result, Video};

pub use backup::{backup_file_name, export_json, export_to_file, import_from_file, import_json};
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use repository::LibraryRepository;
pub use store::{LibraryStore, STORAGE_KEY};
