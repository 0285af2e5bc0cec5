//! Persistence layer
//!
//! The catalog is persisted as one document `{ products, categories }`.
//! Every backend implements [`CatalogStore`]:
//!
//! | Backend | Type | Location |
//! |---------|------|----------|
//! | `memory` | [`MemoryStore`] | process memory |
//! | `json` | [`JsonFileStore`] | `{DATA_DIR}/db.json` |
//! | `redb` | [`RedbStore`] | `{DATA_DIR}/catalog.redb` |
//!
//! [`FallbackStore`] wraps any of them and switches to a seeded in-memory
//! mirror once the primary becomes unreachable.

pub mod fallback;
pub mod json_file;
pub mod memory;
pub mod redb_store;
pub mod seed;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Category, Product};
use thiserror::Error;

pub use fallback::FallbackStore;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

/// The whole persisted catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Newest first
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached (I/O, database open, lock)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The stored document cannot be decoded or encoded
    #[error("Store data corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupt(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Configured persistence backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Json,
    Redb,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Json => "json",
            Self::Redb => "redb",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "json" | "file" => Ok(Self::Json),
            "redb" => Ok(Self::Redb),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// Persistence contract shared by every backend
///
/// `save` replaces the whole document; a failed save leaves the previously
/// stored document in place.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Backend name for health output
    fn backend(&self) -> &'static str;

    /// Read the full document
    async fn load(&self) -> StoreResult<CatalogDocument>;

    /// Replace the full document
    async fn save(&self, document: &CatalogDocument) -> StoreResult<()>;

    /// Cheap reachability check
    async fn ping(&self) -> StoreResult<()> {
        self.load().await.map(|_| ())
    }
}
