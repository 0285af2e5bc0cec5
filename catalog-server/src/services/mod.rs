//! Services Module
//!
//! - catalog_service: product/category reads, writes and statistics
//! - query_cache: TTL read cache
//! - http: router + middleware assembly
//! - rate_limit: per-client request budget

pub mod catalog_service;
pub mod http;
pub mod query_cache;
pub mod rate_limit;

pub use catalog_service::{CachedValue, CatalogService};
pub use query_cache::QueryCache;
pub use rate_limit::RateLimiter;
