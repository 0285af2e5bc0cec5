use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::{
    CatalogStore, FallbackStore, JsonFileStore, MemoryStore, RedbStore, StoreBackend, seed,
};
use crate::services::{CatalogService, QueryCache, RateLimiter};

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 不可变配置 |
/// | catalog | Arc<CatalogService> | 查询服务 + 读缓存 |
/// | store | Arc<FallbackStore> | 存储 (带离线回退) |
/// | rate_limiter | RateLimiter | 按客户端 IP 限流 |
///
/// Cloning is cheap, every field is shared.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<CatalogService>,
    pub store: Arc<FallbackStore>,
    pub rate_limiter: RateLimiter,
}

impl ServerState {
    /// Assemble state around an already opened store
    pub fn new(config: Config, store: Arc<FallbackStore>) -> Self {
        let cache = QueryCache::new(config.cache_ttl());
        let catalog = Arc::new(CatalogService::new(store.clone(), cache));
        let rate_limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window());
        Self {
            config,
            catalog,
            store,
            rate_limiter,
        }
    }

    /// 初始化服务器状态
    ///
    /// Opens the configured backend, wraps it in the offline fallback and
    /// probes it once so that an unreachable store is detected at startup.
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store = Arc::new(open_store(config)?);
        store.probe().await?;

        if store.is_offline() {
            tracing::warn!(
                backend = store.backend(),
                "⚠️ Store unreachable, serving offline mock data"
            );
        } else {
            tracing::info!(
                backend = store.backend(),
                data_dir = %config.data_dir.display(),
                "📦 Catalog store ready"
            );
        }

        Ok(Self::new(config.clone(), store))
    }

    pub fn is_offline(&self) -> bool {
        self.store.is_offline()
    }
}

fn open_store(config: &Config) -> Result<FallbackStore> {
    let primary: Arc<dyn CatalogStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryStore::with_document(seed::mock_document())),
        StoreBackend::Json => Arc::new(JsonFileStore::in_dir(&config.data_dir)),
        StoreBackend::Redb => match RedbStore::in_dir(&config.data_dir) {
            Ok(store) => Arc::new(store),
            Err(e) if e.is_unavailable() && config.offline_fallback => {
                tracing::warn!(error = %e, "Failed to open redb store");
                return Ok(FallbackStore::offline(StoreBackend::Redb.as_str()));
            }
            Err(e) => return Err(e.into()),
        },
    };
    Ok(FallbackStore::new(primary, config.offline_fallback))
}
