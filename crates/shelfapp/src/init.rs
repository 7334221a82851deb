//! # Start-up Wiring
//!
//! [`initialize`] builds the one [`ShelfApi`] a process uses:
//!
//! 1. Load [`ShelfConfig`] (env, then `shelf.toml`, then defaults).
//! 2. Resolve the data directory.
//! 3. Open an [`FsBackend`] there and hydrate every store.
//!
//! ## Data Directory Resolution
//!
//! First match wins:
//! 1. `data_override` argument (the CLI's `--data-dir`).
//! 2. `SHELF_DATA` environment variable. Primarily used by tests to isolate state.
//! 3. `data_dir` from the configuration.
//! 4. The OS data directory (via the `directories` crate).
//! 5. `./.shelf` when no home directory can be determined.
//!
//! ## Config File Resolution
//!
//! `SHELF_CONFIG` if set, otherwise `shelf.toml` in the OS config directory.

use crate::api::ShelfApi;
use crate::config::ShelfConfig;
use crate::error::Result;
use crate::shelf::Shelf;
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATA_ENV: &str = "SHELF_DATA";
pub const CONFIG_ENV: &str = "SHELF_CONFIG";
const CONFIG_FILE: &str = "shelf.toml";

pub struct ShelfContext {
    pub api: ShelfApi<FsBackend>,
    pub config: ShelfConfig,
    pub data_dir: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "shelf", "shelf")
}

/// Where `shelf.toml` is looked for.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn resolve_data_dir(config: &ShelfConfig, data_override: Option<&Path>) -> PathBuf {
    if let Some(path) = data_override {
        return path.to_path_buf();
    }
    if let Some(path) = std::env::var_os(DATA_ENV) {
        return PathBuf::from(path);
    }
    if let Some(path) = &config.data_dir {
        return path.clone();
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".shelf"))
}

/// Load configuration and open the shelf on disk.
pub fn initialize(data_override: Option<&Path>) -> Result<ShelfContext> {
    let config_file = config_path();
    let config = ShelfConfig::load(config_file.as_deref())?;
    let data_dir = resolve_data_dir(&config, data_override);
    debug!(data_dir = %data_dir.display(), "opening shelf");

    let shelf = Shelf::open(FsBackend::new(data_dir.clone()));
    Ok(ShelfContext {
        api: ShelfApi::new(shelf, config.clone()),
        config,
        data_dir,
    })
}
