use crate::shelf::Shelf;
use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// A fresh shelf over the temp directory; opening twice simulates a restart.
    pub fn open(&self) -> Shelf<FsBackend> {
        Shelf::open(FsBackend::new(self.root.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryId, WatchItem};

    #[test]
    fn test_state_survives_restart() {
        let env = TestEnv::new();
        {
            let mut shelf = env.open();
            shelf.my_list.add(WatchItem::new(1, "A"));
        }
        let shelf = env.open();
        assert!(shelf.my_list.contains(&EntryId::Int(1)));
        assert!(env.root.join("myList.json").exists());
    }
}
