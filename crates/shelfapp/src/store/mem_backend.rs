use super::backend::StorageBackend;
use crate::error::{Result, ShelfError};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since shelf is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<BTreeMap<String, String>>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any serialization. Useful for feeding
    /// malformed data to hydration.
    pub fn with_raw(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Test helper to peek at a stored value without going through a store.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(ShelfError::Store("Simulated read error".to_string()));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ShelfError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.values.borrow().keys().cloned().collect())
    }

    fn location(&self, key: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key_is_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.read("myList").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let backend = MemBackend::new();
        backend.write("myList", "[]").unwrap();
        assert_eq!(backend.read("myList").unwrap(), Some("[]".to_string()));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn test_simulated_write_error_leaves_value_untouched() {
        let backend = MemBackend::new().with_raw("k", "old");
        backend.set_simulate_write_error(true);
        assert!(backend.write("k", "new").is_err());
        assert_eq!(backend.raw("k"), Some("old".to_string()));
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_keys_are_sorted() {
        let backend = MemBackend::new().with_raw("b", "1").with_raw("a", "2");
        assert_eq!(backend.keys().unwrap(), vec!["a", "b"]);
    }
}
