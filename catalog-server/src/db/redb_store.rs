//! redb-based document store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `catalog` | `"document"` | JSON `CatalogDocument` | Whole catalog |
//!
//! redb is synchronous; every call runs on the blocking thread pool.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, TableDefinition};

use super::{CatalogDocument, CatalogStore, StoreError, StoreResult};

/// Default file name inside the data directory
pub const DB_FILE_NAME: &str = "catalog.redb";

/// key = document name, value = JSON-serialized CatalogDocument
const CATALOG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("catalog");

const DOCUMENT_KEY: &str = "document";

fn unavailable(e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path).map_err(unavailable)?;
        Self::init(db)
    }

    /// `{data_dir}/catalog.redb`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(data_dir.as_ref().join(DB_FILE_NAME))
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(unavailable)?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        // Create the table so that reads never hit a missing table
        let write_txn = db.begin_write().map_err(unavailable)?;
        {
            let _ = write_txn.open_table(CATALOG_TABLE).map_err(unavailable)?;
        }
        write_txn.commit().map_err(unavailable)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn load_blocking(db: &Database) -> StoreResult<CatalogDocument> {
        let read_txn = db.begin_read().map_err(unavailable)?;
        let table = read_txn.open_table(CATALOG_TABLE).map_err(unavailable)?;
        match table.get(DOCUMENT_KEY).map_err(unavailable)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Ok(CatalogDocument::default()),
        }
    }

    fn save_blocking(db: &Database, bytes: &[u8]) -> StoreResult<()> {
        let write_txn = db.begin_write().map_err(unavailable)?;
        {
            let mut table = write_txn.open_table(CATALOG_TABLE).map_err(unavailable)?;
            table.insert(DOCUMENT_KEY, bytes).map_err(unavailable)?;
        }
        write_txn.commit().map_err(unavailable)?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for RedbStore {
    fn backend(&self) -> &'static str {
        "redb"
    }

    async fn load(&self) -> StoreResult<CatalogDocument> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || Self::load_blocking(&db))
            .await
            .map_err(unavailable)?
    }

    async fn save(&self, document: &CatalogDocument) -> StoreResult<()> {
        let bytes = serde_json::to_vec(document)?;
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || Self::save_blocking(&db, &bytes))
            .await
            .map_err(unavailable)?
    }
}
