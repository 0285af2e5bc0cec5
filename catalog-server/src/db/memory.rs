//! In-process store

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{CatalogDocument, CatalogStore, StoreResult};

/// Document held in memory, lost on restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<CatalogDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: CatalogDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> StoreResult<CatalogDocument> {
        Ok(self.document.read().clone())
    }

    async fn save(&self, document: &CatalogDocument) -> StoreResult<()> {
        *self.document.write() = document.clone();
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
