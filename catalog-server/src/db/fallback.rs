//! Offline fallback
//!
//! Wraps the configured store. The first time the primary reports
//! [`StoreError::Unavailable`], the wrapper switches to an in-memory mirror
//! seeded with the mock catalog and stays there for the life of the
//! process. Corrupt data is not treated as unreachable and is passed
//! through.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{CatalogDocument, CatalogStore, MemoryStore, StoreError, StoreResult, seed};

pub struct FallbackStore {
    backend: &'static str,
    /// `None` when the primary could not even be opened
    primary: Option<Arc<dyn CatalogStore>>,
    mirror: MemoryStore,
    enabled: bool,
    offline: AtomicBool,
}

impl FallbackStore {
    /// `enabled = false` passes every primary error through unchanged
    pub fn new(primary: Arc<dyn CatalogStore>, enabled: bool) -> Self {
        Self {
            backend: primary.backend(),
            primary: Some(primary),
            mirror: MemoryStore::with_document(seed::mock_document()),
            enabled,
            offline: AtomicBool::new(false),
        }
    }

    /// Start directly in offline mode, the primary could not be opened
    pub fn offline(backend: &'static str) -> Self {
        Self {
            backend,
            primary: None,
            mirror: MemoryStore::with_document(seed::mock_document()),
            enabled: true,
            offline: AtomicBool::new(true),
        }
    }

    /// Primary store while still online
    fn online_primary(&self) -> Option<&Arc<dyn CatalogStore>> {
        if self.is_offline() {
            None
        } else {
            self.primary.as_ref()
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check the primary once and switch if it is unreachable
    pub async fn probe(&self) -> StoreResult<()> {
        self.ping().await
    }

    /// Decide whether a primary failure should move us to the mirror
    fn should_fall_back(&self, err: &StoreError) -> bool {
        if !self.enabled || !err.is_unavailable() {
            return false;
        }
        if !self.offline.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                backend = self.backend,
                error = %err,
                "Primary store unreachable, switching to offline mock data"
            );
        }
        true
    }
}

#[async_trait]
impl CatalogStore for FallbackStore {
    fn backend(&self) -> &'static str {
        self.backend
    }

    async fn load(&self) -> StoreResult<CatalogDocument> {
        let Some(primary) = self.online_primary() else {
            return self.mirror.load().await;
        };
        match primary.load().await {
            Err(e) if self.should_fall_back(&e) => self.mirror.load().await,
            other => other,
        }
    }

    async fn save(&self, document: &CatalogDocument) -> StoreResult<()> {
        let Some(primary) = self.online_primary() else {
            return self.mirror.save(document).await;
        };
        match primary.save(document).await {
            Err(e) if self.should_fall_back(&e) => self.mirror.save(document).await,
            other => other,
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        let Some(primary) = self.online_primary() else {
            return Ok(());
        };
        match primary.ping().await {
            Err(e) if self.should_fall_back(&e) => Ok(()),
            other => other,
        }
    }
}
