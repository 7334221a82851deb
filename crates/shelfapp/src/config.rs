//! # Configuration
//!
//! Shelf configuration is managed by [`confique`], which handles layered
//! loading from environment variables, a TOML file and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SHELF_DATA_DIR`, `SHELF_CONTINUE_WATCHING_LIMIT`,
//!    `SHELF_COMPLETION_THRESHOLD`.
//! 2. **Config file**: `shelf.toml` in the OS config directory (via the
//!    `directories` crate), or the path in `SHELF_CONFIG`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where store files are written |
//! | `continue_watching_limit` | `10` | Rows shown by `shelf progress list` |
//! | `completion_threshold` | `95.0` | Percent at which a title counts as finished |

use crate::error::{Result, ShelfError};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for shelf, stored in `shelf.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShelfConfig {
    /// Directory holding the store files. Defaults to the OS data directory.
    #[config(env = "SHELF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// How many entries the continue-watching list shows by default.
    #[config(default = 10, env = "SHELF_CONTINUE_WATCHING_LIMIT")]
    pub continue_watching_limit: usize,

    /// Progress percentage at which a title is considered finished and drops
    /// out of continue-watching.
    #[config(default = 95.0, env = "SHELF_COMPLETION_THRESHOLD")]
    pub completion_threshold: f64,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            continue_watching_limit: 10,
            completion_threshold: 95.0,
        }
    }
}

impl ShelfConfig {
    /// Load from the environment, then `path` if it exists, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ShelfConfig::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder
            .load()
            .map_err(|e| ShelfError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.completion_threshold) {
            return Err(ShelfError::Config(format!(
                "completion_threshold must be between 0 and 100, got {}",
                self.completion_threshold
            )));
        }
        Ok(())
    }

    /// Whether a progress percentage counts as finished.
    pub fn is_complete(&self, progress: f64) -> bool {
        progress >= self.completion_threshold
    }
}
