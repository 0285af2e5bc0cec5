//! Core Module
//!
//! - config: environment configuration
//! - error: startup errors
//! - server: HTTP listener lifecycle
//! - state: shared server state

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
