//! 统一错误处理
//!
//! Application error type and its HTTP mapping:
//!
//! | 变体 | HTTP | `error` |
//! |------|------|---------|
//! | `Validation` | 400 | `validation` |
//! | `UnknownAction` | 400 | `unknown_action` |
//! | `NotFound` | 404 | `not_found` |
//! | `Conflict` | 409 | `exists` |
//! | `RateLimited` | 429 | `rate_limited` |
//! | `Internal` | 500 | `internal_error` |
//!
//! # 使用示例
//!
//! ```ignore
//! Err(AppError::not_found(format!("Product {}", id)))
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::error::{ErrorBody, ErrorCode};
use shared::models::UnknownAction;
use tracing::error;

use super::validation::ValidationErrors;
use crate::db::StoreError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// 验证失败 (400), carries every failing field
    Validation(ValidationErrors),

    #[error("Unknown action: {0}")]
    /// 未知操作 (400)
    UnknownAction(String),

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("Too many requests: {0}")]
    /// 请求过多 (429)
    RateLimited(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Validation error with a single failing field
    pub fn validation(field: &str, msg: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, msg))
    }

    /// Wire error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::Validation,
            Self::UnknownAction(_) => ErrorCode::UnknownAction,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Conflict(_) => ErrorCode::Exists,
            Self::RateLimited(_) => ErrorCode::RateLimited,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status =
            StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self {
            AppError::Validation(errors) => {
                ErrorBody::with_message(code, errors.to_string()).with_fields(errors.into_fields())
            }
            AppError::UnknownAction(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::RateLimited(msg) => ErrorBody::with_message(code, msg),
            AppError::Internal(msg) => {
                // 记录内部错误但不暴露详细信息
                error!(target: "internal", error = %msg, "Internal error occurred");
                ErrorBody::with_message(code, "Internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("body", rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<UnknownAction> for AppError {
    fn from(e: UnknownAction) -> Self {
        AppError::UnknownAction(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}
