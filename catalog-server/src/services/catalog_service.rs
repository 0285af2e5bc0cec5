//! Catalog Service - product and category management over a swappable store
//!
//! Reads go through a [`QueryCache`]; every successful write clears it. A
//! read that loaded its document before a write finished does not cache its
//! result.
//! Writes are serialized by an async mutex held across the
//! load → modify → save cycle, so concurrent writes never interleave.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{
    CatalogStats, Category, CategoryCount, CategoryCreate, CategoryUpdate, LOW_STOCK_THRESHOLD,
    PaginatedResponse, Product, ProductAction, ProductCreate, ProductQuery, ProductUpdate,
};
use tokio::sync::Mutex;

use super::query_cache::QueryCache;
use crate::db::{CatalogDocument, CatalogStore};
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_URL_LEN, MIN_CATEGORY_NAME_LEN, MIN_PRODUCT_NAME_LEN, ValidationErrors,
    check_name, check_optional_text, check_price, check_quantity,
};
use crate::utils::{AppError, AppResult};

// =============================================================================
// Cache keys & values
// =============================================================================

const CATEGORIES_KEY: &str = "categories";
const ALL_PRODUCTS_KEY: &str = "products:all";

/// Values held by the read cache
#[derive(Debug, Clone)]
pub enum CachedValue {
    Page(Arc<PaginatedResponse<Product>>),
    Categories(Arc<Vec<Category>>),
    AllProducts(Arc<Vec<Product>>),
}

// =============================================================================
// Helpers
// =============================================================================

/// Empty or whitespace-only text counts as absent
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn matches_query(product: &Product, query: &ProductQuery) -> bool {
    if let Some(q) = &query.q {
        let in_name = product.name.to_lowercase().contains(q.as_str());
        let in_description = product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(q.as_str()));
        if !in_name && !in_description {
            return false;
        }
    }
    if let Some(category_id) = &query.category_id
        && product.category_id.as_deref() != Some(category_id.as_str())
    {
        return false;
    }
    true
}

/// Filter then page. `total` counts filtered items before slicing.
pub fn paginate(products: &[Product], query: &ProductQuery) -> PaginatedResponse<Product> {
    let query = query.clone().normalized();
    let filtered: Vec<&Product> = products.iter().filter(|p| matches_query(p, &query)).collect();
    let items = filtered
        .iter()
        .skip(query.offset())
        .take(query.page_size as usize)
        .map(|p| (*p).clone())
        .collect();

    PaginatedResponse {
        items,
        total: filtered.len() as u64,
        page: query.page,
        page_size: query.page_size,
    }
}

/// Aggregate over the full product set
///
/// Fails instead of panicking when the total value does not fit a `Decimal`.
pub fn compute_stats(products: &[Product], categories: &[Category]) -> AppResult<CatalogStats> {
    let total_value = products
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| {
            p.stock_value().and_then(|v| acc.checked_add(v))
        })
        .ok_or_else(|| AppError::internal("total stock value overflowed"))?;

    let low_stock = products
        .iter()
        .filter(|p| p.is_low_stock(LOW_STOCK_THRESHOLD))
        .cloned()
        .collect();

    let by_category = categories
        .iter()
        .map(|c| CategoryCount {
            category_id: c.id.clone(),
            name: c.name.clone(),
            count: products
                .iter()
                .filter(|p| p.category_id.as_deref() == Some(c.id.as_str()))
                .count() as u64,
        })
        .collect();

    Ok(CatalogStats {
        total_count: products.len() as u64,
        total_value: total_value.normalize(),
        low_stock_threshold: LOW_STOCK_THRESHOLD,
        low_stock,
        by_category,
    })
}

/// Resolve a requested category reference against the document
fn check_category_ref(
    errors: &mut ValidationErrors,
    document: &CatalogDocument,
    category_id: Option<&str>,
) -> Option<String> {
    let category_id = non_blank(category_id)?;
    if document.categories.iter().any(|c| c.id == category_id) {
        Some(category_id)
    } else {
        errors.add("categoryId", format!("category '{category_id}' does not exist"));
        None
    }
}

// =============================================================================
// Service
// =============================================================================

pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    cache: QueryCache<CachedValue>,
    write_lock: Mutex<()>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, cache: QueryCache<CachedValue>) -> Self {
        Self {
            store,
            cache,
            write_lock: Mutex::new(()),
        }
    }

    /// Number of live cache entries
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached read
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Catalog cache invalidated");
    }

    fn cached(&self, key: &str, refresh: bool) -> Option<CachedValue> {
        if refresh {
            tracing::debug!(key, "Cache bypass");
            return None;
        }
        let hit = self.cache.get(key);
        tracing::debug!(key, hit = hit.is_some(), "Cache lookup");
        hit
    }

    // ========== Reads ==========

    /// Filtered, paginated product list
    pub async fn list_products(
        &self,
        query: &ProductQuery,
        refresh: bool,
    ) -> AppResult<Arc<PaginatedResponse<Product>>> {
        let query = query.clone().normalized();
        let key = query.cache_key();
        if let Some(CachedValue::Page(page)) = self.cached(&key, refresh) {
            return Ok(page);
        }

        let generation = self.cache.generation();
        let document = self.store.load().await?;
        let page = Arc::new(paginate(&document.products, &query));
        self.cache.set(generation, key, CachedValue::Page(page.clone()));
        Ok(page)
    }

    /// Every product, unpaginated
    pub async fn all_products(&self, refresh: bool) -> AppResult<Arc<Vec<Product>>> {
        if let Some(CachedValue::AllProducts(products)) = self.cached(ALL_PRODUCTS_KEY, refresh) {
            return Ok(products);
        }

        let generation = self.cache.generation();
        let document = self.store.load().await?;
        let products = Arc::new(document.products);
        self.cache.set(
            generation,
            ALL_PRODUCTS_KEY,
            CachedValue::AllProducts(products.clone()),
        );
        Ok(products)
    }

    pub async fn get_product(&self, id: &str) -> AppResult<Product> {
        self.all_products(false)
            .await?
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Product {id}")))
    }

    pub async fn list_categories(&self, refresh: bool) -> AppResult<Arc<Vec<Category>>> {
        if let Some(CachedValue::Categories(categories)) = self.cached(CATEGORIES_KEY, refresh) {
            return Ok(categories);
        }

        let generation = self.cache.generation();
        let document = self.store.load().await?;
        let categories = Arc::new(document.categories);
        self.cache.set(
            generation,
            CATEGORIES_KEY,
            CachedValue::Categories(categories.clone()),
        );
        Ok(categories)
    }

    pub async fn get_category(&self, id: &str) -> AppResult<Category> {
        self.list_categories(false)
            .await?
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Category {id}")))
    }

    /// Statistics over the full product set, never over a page
    pub async fn stats(&self, refresh: bool) -> AppResult<CatalogStats> {
        let products = self.all_products(refresh).await?;
        let categories = self.list_categories(refresh).await?;
        compute_stats(&products, &categories)
    }

    // ========== Writes ==========

    /// Persist a modified document and clear the cache
    async fn commit(&self, document: &CatalogDocument) -> AppResult<()> {
        self.store.save(document).await?;
        self.cache.invalidate_all();
        Ok(())
    }

    pub async fn create_product(&self, payload: ProductCreate) -> AppResult<Product> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let mut errors = ValidationErrors::new();
        let name = check_name(
            &mut errors,
            "name",
            payload.name.as_deref(),
            MIN_PRODUCT_NAME_LEN,
            true,
        );
        let price = check_price(&mut errors, payload.price, true);
        let quantity = check_quantity(&mut errors, payload.quantity, true);
        check_optional_text(
            &mut errors,
            "description",
            payload.description.as_deref(),
            MAX_NOTE_LEN,
        );
        check_optional_text(&mut errors, "image", payload.image.as_deref(), MAX_URL_LEN);
        let category_id = check_category_ref(&mut errors, &document, payload.category_id.as_deref());
        errors.finish()?;

        let (Some(name), Some(price), Some(quantity)) = (name, price, quantity) else {
            return Err(AppError::internal("validated product fields missing"));
        };

        let now = Utc::now();
        let product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: non_blank(payload.description.as_deref()),
            price,
            quantity,
            category_id,
            image: non_blank(payload.image.as_deref()),
            created_at: now,
            updated_at: now,
        };

        // newest first
        document.products.insert(0, product.clone());
        self.commit(&document).await?;

        tracing::info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Merge the fields present in `payload`; only those are validated
    pub async fn update_product(&self, id: &str, payload: ProductUpdate) -> AppResult<Product> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let index = document
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;

        let mut errors = ValidationErrors::new();
        let name = check_name(
            &mut errors,
            "name",
            payload.name.as_deref(),
            MIN_PRODUCT_NAME_LEN,
            false,
        );
        let price = check_price(&mut errors, payload.price, false);
        let quantity = check_quantity(&mut errors, payload.quantity, false);
        check_optional_text(
            &mut errors,
            "description",
            payload.description.as_deref(),
            MAX_NOTE_LEN,
        );
        if let Some(Some(image)) = &payload.image {
            check_optional_text(&mut errors, "image", Some(image.as_str()), MAX_URL_LEN);
        }
        let category_id = match &payload.category_id {
            Some(requested) => Some(check_category_ref(&mut errors, &document, requested.as_deref())),
            None => None,
        };
        errors.finish()?;

        let product = &mut document.products[index];
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(description) = &payload.description {
            product.description = non_blank(Some(description.as_str()));
        }
        if let Some(price) = price {
            product.price = price;
        }
        if let Some(quantity) = quantity {
            product.quantity = quantity;
        }
        if let Some(category_id) = category_id {
            product.category_id = category_id;
        }
        if let Some(image) = &payload.image {
            product.image = non_blank(image.as_deref());
        }
        product.updated_at = Utc::now();
        let updated = product.clone();

        self.commit(&document).await?;

        tracing::info!(id = %updated.id, "Product updated");
        Ok(updated)
    }

    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let index = document
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
        document.products.remove(index);
        self.commit(&document).await?;

        tracing::info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Quick stock action; `view` reads without writing
    pub async fn apply_action(&self, id: &str, action: ProductAction) -> AppResult<Product> {
        if !action.is_mutation() {
            return self.get_product(id).await;
        }

        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let product = document
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;

        match action {
            ProductAction::Increment => product.quantity = product.quantity.saturating_add(1),
            ProductAction::Decrement => product.quantity = product.quantity.saturating_sub(1),
            ProductAction::View => {}
        }
        product.updated_at = Utc::now();
        let updated = product.clone();

        self.commit(&document).await?;

        tracing::info!(id = %updated.id, action = %action, quantity = updated.quantity, "Product action applied");
        Ok(updated)
    }

    pub async fn create_category(&self, payload: CategoryCreate) -> AppResult<Category> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let mut errors = ValidationErrors::new();
        let name = check_name(
            &mut errors,
            "name",
            payload.name.as_deref(),
            MIN_CATEGORY_NAME_LEN,
            true,
        );
        errors.finish()?;
        let Some(name) = name else {
            return Err(AppError::internal("validated category name missing"));
        };

        if document.categories.iter().any(|c| c.has_name(&name)) {
            return Err(AppError::conflict(format!("Category '{name}' already exists")));
        }

        let category = Category {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        };
        document.categories.push(category.clone());
        self.commit(&document).await?;

        tracing::info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Rename; uniqueness is checked against every other category
    pub async fn update_category(&self, id: &str, payload: CategoryUpdate) -> AppResult<Category> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let index = document
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Category {id}")))?;

        let mut errors = ValidationErrors::new();
        let name = check_name(
            &mut errors,
            "name",
            payload.name.as_deref(),
            MIN_CATEGORY_NAME_LEN,
            true,
        );
        errors.finish()?;
        let Some(name) = name else {
            return Err(AppError::internal("validated category name missing"));
        };

        if document
            .categories
            .iter()
            .any(|c| c.id != id && c.has_name(&name))
        {
            return Err(AppError::conflict(format!("Category '{name}' already exists")));
        }

        document.categories[index].name = name;
        let updated = document.categories[index].clone();
        self.commit(&document).await?;

        tracing::info!(id = %updated.id, name = %updated.name, "Category renamed");
        Ok(updated)
    }

    /// Remove a category and detach every product that referenced it
    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.store.load().await?;

        let index = document
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Category {id}")))?;
        document.categories.remove(index);

        let now = Utc::now();
        let mut detached = 0usize;
        for product in document
            .products
            .iter_mut()
            .filter(|p| p.category_id.as_deref() == Some(id))
        {
            product.category_id = None;
            product.updated_at = now;
            detached += 1;
        }

        self.commit(&document).await?;

        tracing::info!(id = %id, detached, "Category deleted");
        Ok(())
    }
}
