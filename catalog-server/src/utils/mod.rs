//! Utility Module
//!
//! - error: application error type and HTTP mapping
//! - logger: tracing setup
//! - result: `AppResult` alias
//! - types: query/body helper types
//! - validation: field checks

pub mod error;
pub mod logger;
pub mod result;
pub mod types;
pub mod validation;

pub use error::AppError;
pub use logger::{init_logger, init_logger_with_file};
pub use result::AppResult;
pub use types::{ActionRequest, ProductListParams, RefreshParams};
pub use validation::ValidationErrors;
