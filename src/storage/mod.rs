//! Filesystem pick and game store.
//!
//! Game results and picks live as JSON Lines under
//! `<data_dir>/normalized/<season>/`. The store is a collaborator of the
//! engine only: it hands back fresh snapshots and never grades anything.

mod jsonl;
mod pool;

pub use jsonl::*;
pub use pool::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }

    pub fn season_dir(&self, season: u32) -> PathBuf {
        self.normalized_dir().join(season.to_string())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
