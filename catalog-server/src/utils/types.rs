//! Shared Types
//!
//! Query string and body types used by the HTTP handlers

use serde::Deserialize;
use shared::models::{DEFAULT_PAGE_SIZE, ProductQuery};

/// `GET /api/products` query parameters
///
/// Values are kept as raw strings so that garbage like `page=abc` falls
/// back to the default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub q: Option<String>,
    pub category_id: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub refresh: Option<String>,
}

fn parse_number(value: Option<&str>, default: u32) -> u32 {
    match value.map(str::trim).and_then(|v| v.parse::<i64>().ok()) {
        Some(n) => n.clamp(0, u32::MAX as i64) as u32,
        None => default,
    }
}

impl ProductListParams {
    /// Normalized query
    pub fn to_query(&self) -> ProductQuery {
        ProductQuery {
            q: self.q.clone(),
            category_id: self.category_id.clone(),
            page: parse_number(self.page.as_deref(), 1),
            page_size: parse_number(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        }
        .normalized()
    }

    pub fn refresh(&self) -> bool {
        is_truthy(self.refresh.as_deref())
    }
}

/// `?refresh=true` on read endpoints without other parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshParams {
    pub refresh: Option<String>,
}

impl RefreshParams {
    pub fn refresh(&self) -> bool {
        is_truthy(self.refresh.as_deref())
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes")
    )
}

/// `POST /api/products/{id}/action` body
///
/// The action name stays a string here so that an unrecognised value maps
/// to `unknown_action` rather than a body decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub action: Option<String>,
}
