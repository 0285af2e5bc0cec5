//! Aggregate inventory statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// Products with `quantity` strictly below this are low stock
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Statistics over the full (unfiltered, unpaginated) product set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_count: u64,
    /// Σ price × quantity
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    pub low_stock_threshold: u32,
    pub low_stock: Vec<Product>,
    /// Product count per category, in category order
    pub by_category: Vec<CategoryCount>,
}

/// Number of products assigned to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category_id: String,
    pub name: String,
    pub count: u64,
}
