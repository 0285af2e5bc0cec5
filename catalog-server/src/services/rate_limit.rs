//! Per-client request rate limiting
//!
//! Fixed window per client IP: at most `max_requests` within `window`, then
//! `429 rate_limited` until the window rolls over. `max_requests == 0`
//! turns the limiter off.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::core::ServerState;
use crate::utils::AppError;

/// Idle entries older than this are dropped by [`RateLimiter::cleanup`]
const IDLE_RETENTION: Duration = Duration::from_secs(300);

struct ClientEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    /// client IP -> entry
    clients: Arc<Mutex<HashMap<String, ClientEntry>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(&self, client: &str) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let mut clients = self.clients.lock().await;
        let now = Instant::now();
        let entry = clients
            .entry(client.to_owned())
            .or_insert_with(|| ClientEntry {
                count: 0,
                window_start: now,
            });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count = entry.count.saturating_add(1);
        entry.count <= self.max_requests
    }

    /// Forget clients whose window started long ago
    pub async fn cleanup(&self) {
        let retention = IDLE_RETENTION.max(self.window);
        let now = Instant::now();
        self.clients
            .lock()
            .await
            .retain(|_, entry| now.duration_since(entry.window_start) < retention);
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

/// Client IP: first `X-Forwarded-For` entry, then the peer address.
fn client_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Rate limit middleware applied to every route
pub async fn rate_limit(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);
    if !state.rate_limiter.check(&ip).await {
        tracing::warn!(client = %ip, "Rate limit exceeded");
        return Err(AppError::RateLimited(
            "Too many requests, try again later".into(),
        ));
    }
    Ok(next.run(request).await)
}
