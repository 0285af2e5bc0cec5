//! Startup errors
//!
//! Request-level failures use [`crate::utils::AppError`]; this type only
//! covers failures that stop the server from coming up.

use thiserror::Error;

use crate::db::StoreError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Startup Result alias
pub type Result<T> = std::result::Result<T, ServerError>;
