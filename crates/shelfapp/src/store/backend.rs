use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for the raw key-value backing.
///
/// A backing is a flat namespace of string keys mapping to string values,
/// read and written whole. It knows nothing about entries or JSON; that is
/// the repository's job. Every method takes `&self`: file backings are
/// stateless I/O and the memory backing uses interior mutability.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing has been written yet.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// All keys currently holding a value, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    /// Where the value for `key` lives.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self, key: &str) -> PathBuf;
}

/// Lets several owners share one backing.
impl<B: StorageBackend + ?Sized> StorageBackend for std::rc::Rc<B> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn location(&self, key: &str) -> PathBuf {
        (**self).location(key)
    }
}
