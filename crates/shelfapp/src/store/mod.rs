//! # Storage Layer
//!
//! This module defines how preference data is held and persisted.
//!
//! ## Layers
//!
//! ```text
//! ListStore<T, R>        one typed, uniquely keyed collection
//!     │  load() once / save(all) after every change
//!     ▼
//! Repository<T>          key + JSON codec (JsonRepository)
//!     │  read / write whole strings
//!     ▼
//! StorageBackend         flat string key-value backing
//!                        FsBackend (files), MemBackend (tests)
//! ```
//!
//! ## Philosophy
//!
//! - **Memory is the truth for the session**: the collection is loaded once and
//!   the in-memory copy is authoritative afterwards. Data changed on disk by
//!   another process is not noticed; the last writer wins.
//! - **Full rewrites**: every change serializes the whole collection. There
//!   are no deltas and no grouping of writes.
//! - **Never fatal**: unreadable data hydrates as empty with a
//!   [`list_store::Hydration::Failed`] status; failed writes are logged and
//!   recorded on the store. Neither is returned as an error.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── myList.json
//! ├── continueWatching.json
//! ├── userRatings.json
//! ├── userReviews.json
//! ├── sharedContent.json
//! ├── recommendations.json
//! └── groupWatches.json
//! ```
//!
//! Each file holds one JSON array of entry objects, with no schema version.

pub mod backend;
pub mod fs_backend;
pub mod list_store;
pub mod mem_backend;
pub mod memory;
pub mod repository;
