//! Mock dataset served in offline mode

use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{Category, Product};

use super::CatalogDocument;

/// (id, name)
const MOCK_CATEGORIES: [(&str, &str); 3] = [("1", "Shirts"), ("2", "Pants"), ("3", "T-Shirts")];

/// (id, name, description, price, quantity, category id)
const MOCK_PRODUCTS: [(&str, &str, &str, i64, u32, &str); 4] = [
    ("1", "Linen Shirt", "Light linen fabric", 45, 90, "1"),
    ("2", "Jeans Jacket", "Blue jeans jacket", 65, 70, "2"),
    ("3", "Black T-Shirt", "Cotton T-shirt", 20, 8, "3"),
    ("4", "Slim Fit Jeans", "Slim jeans", 80, 0, "2"),
];

/// Fixed seed catalog: 3 categories, 4 products
pub fn mock_document() -> CatalogDocument {
    let now = Utc::now();

    let categories = MOCK_CATEGORIES
        .iter()
        .map(|(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
        .collect();

    let products = MOCK_PRODUCTS
        .iter()
        .map(|(id, name, description, price, quantity, category_id)| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            price: Decimal::from(*price),
            quantity: *quantity,
            category_id: Some(category_id.to_string()),
            image: None,
            created_at: now,
            updated_at: now,
        })
        .collect();

    CatalogDocument {
        products,
        categories,
    }
}
