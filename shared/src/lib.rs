//! Shared types for the inventory catalog
//!
//! Wire types used by the catalog server and by any client talking to it:
//! products, categories, list queries, aggregate statistics and the error
//! body returned on failures.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ErrorBody, ErrorCode, FieldError};
pub use models::{
    CatalogStats, Category, CategoryCount, CategoryCreate, CategoryUpdate, PaginatedResponse,
    Product, ProductAction, ProductCreate, ProductQuery, ProductUpdate,
};
pub use rust_decimal::Decimal;
