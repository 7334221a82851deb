//! Repositories turn a key in a [`StorageBackend`] into a typed collection.
//!
//! The store never touches the backing directly: it asks its repository to
//! `load()` once and to `save()` the whole collection after every mutation.

use super::backend::StorageBackend;
use crate::error::{Result, ShelfError};
use crate::model::Entry;
use std::marker::PhantomData;
use std::rc::Rc;

/// What came back from a load, kept distinct so callers can tell an empty
/// store apart from one that failed to load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(Vec<T>),
    /// Nothing stored under the key yet.
    Missing,
    /// Stored data could not be parsed.
    Corrupt { reason: String },
    /// The backing could not be read at all.
    Unavailable { reason: String },
}

pub trait Repository<T> {
    /// Storage key this repository reads and writes.
    fn key(&self) -> &str;

    fn load(&self) -> LoadOutcome<T>;

    /// Replace the persisted collection.
    fn save(&self, items: &[T]) -> Result<()>;
}

/// Stores a collection as a single JSON array under one key.
pub struct JsonRepository<B, T> {
    backend: Rc<B>,
    key: String,
    _entries: PhantomData<fn() -> T>,
}

impl<B: StorageBackend, T: Entry> JsonRepository<B, T> {
    pub fn new(backend: Rc<B>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            _entries: PhantomData,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend, T: Entry> Repository<T> for JsonRepository<B, T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> LoadOutcome<T> {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Missing,
            Err(e) => {
                return LoadOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        };
        if raw.trim().is_empty() {
            return LoadOutcome::Missing;
        }
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => LoadOutcome::Loaded(items),
            Err(e) => LoadOutcome::Corrupt {
                reason: e.to_string(),
            },
        }
    }

    fn save(&self, items: &[T]) -> Result<()> {
        let content = serde_json::to_string(items).map_err(ShelfError::Serialization)?;
        self.backend.write(&self.key, &content)
    }
}
