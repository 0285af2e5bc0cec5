//! Data models
//!
//! Shared between catalog-server and the dashboard (via API).
//! Field names are camelCase on the wire. All IDs are opaque strings.

pub mod action;
pub mod category;
pub mod product;
pub mod query;
pub mod serde_helpers;
pub mod stats;

// Re-exports
pub use action::{ProductAction, UnknownAction};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PaginatedResponse, ProductQuery};
pub use stats::{CatalogStats, CategoryCount, LOW_STOCK_THRESHOLD};
