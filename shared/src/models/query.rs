//! 查询请求类型
//!
//! Product list filter + pagination, and the paginated response envelope.

use serde::{Deserialize, Serialize};

/// Default page size when none (or garbage) is given
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page size a caller may request
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Category filter value meaning "no category filter"
const ALL_CATEGORIES: &str = "all";

/// Product list query
///
/// Always construct through [`ProductQuery::new`] or call
/// [`ProductQuery::normalized`] before use so that `page >= 1` and
/// `1 <= page_size <= MAX_PAGE_SIZE` hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Case-insensitive substring over name or description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Exact category match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Page number (从 1 开始)
    pub page: u32,
    /// 每页数量
    pub page_size: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            q: None,
            category_id: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
        .normalized()
    }

    /// 添加搜索词
    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self.normalized()
    }

    /// 添加分类过滤
    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self.normalized()
    }

    /// Clamp paging bounds and drop empty / "all" filters
    pub fn normalized(self) -> Self {
        let q = self
            .q
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let category_id = self
            .category_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));
        Self {
            q,
            category_id,
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.page_size as usize
    }

    /// Cache signature: `products:{page}:{pageSize}:{q}:{categoryId}`
    pub fn cache_key(&self) -> String {
        format!(
            "products:{}:{}:{}:{}",
            self.page,
            self.page_size,
            self.q.as_deref().unwrap_or(""),
            self.category_id.as_deref().unwrap_or(ALL_CATEGORIES)
        )
    }
}

/// 分页响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// 当前页数据
    pub items: Vec<T>,
    /// 过滤后 (分页前) 的总记录数
    pub total: u64,
    /// 当前页码
    pub page: u32,
    /// 每页数量
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_paging() {
        let query = ProductQuery {
            page: 0,
            page_size: 5000,
            ..Default::default()
        }
        .normalized();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, MAX_PAGE_SIZE);

        let query = ProductQuery::new(3, 0);
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 1);
    }

    #[test]
    fn test_normalized_drops_empty_and_all_filters() {
        let query = ProductQuery::default().search("   ").in_category("all");
        assert_eq!(query.q, None);
        assert_eq!(query.category_id, None);

        let query = ProductQuery::default().search(" Jean ").in_category("2");
        assert_eq!(query.q.as_deref(), Some("jean"));
        assert_eq!(query.category_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_offset() {
        assert_eq!(ProductQuery::new(1, 50).offset(), 0);
        assert_eq!(ProductQuery::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_cache_key_distinguishes_signatures() {
        let a = ProductQuery::new(1, 50).search("jean");
        let b = ProductQuery::new(2, 50).search("jean");
        let c = ProductQuery::new(1, 50).search("jean").in_category("2");
        assert_eq!(a.cache_key(), "products:1:50:jean:all");
        assert_ne!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
    }
}
