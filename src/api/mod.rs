//! Client for the remote catalog and inquiry REST API.
//!
//! Access is seamed through reader/writer traits so that page services can
//! be tested against an in-memory stand-in, with [`RestClient`] as the
//! production implementation.

use crate::domain::category::ProductCategory;
use crate::domain::inquiry::{Inquiry, InquiryUpdate, NewInquiry};
use crate::domain::product::Product;
use crate::domain::types::{InquiryId, ProductId};

pub mod client;
pub mod envelope;
pub mod error;

pub use client::RestClient;
pub use error::{ApiError, ApiResult};

/// Query parameters used when listing products (`GET /products`).
///
/// Setter values go through the same hygiene regardless of origin: `search`
/// is trimmed and dropped when empty, and `category_id` additionally drops
/// the literal `"undefined"`/`"null"` strings that leak from URL
/// round-tripping in the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl ProductListQuery {
    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        let category_id = category_id.into();
        let trimmed = category_id.trim();
        if !trimmed.is_empty() && trimmed != "undefined" && trimmed != "null" {
            self.category_id = Some(trimmed.to_string());
        }
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        if !trimmed.is_empty() {
            self.search = Some(trimmed.to_string());
        }
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Wire parameters in a stable order, with absent values omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category_id) = &self.category_id {
            pairs.push(("category_id", category_id.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }

    /// Stable key fragment for the query cache.
    pub fn cache_key(&self) -> String {
        self.to_query_pairs()
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Read-only operations for catalog entities.
pub trait CatalogReader {
    /// List products matching the supplied query parameters.
    fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> impl Future<Output = ApiResult<Vec<Product>>>;
    /// Retrieve a product by its identifier.
    fn get_product(&self, id: &ProductId) -> impl Future<Output = ApiResult<Option<Product>>>;
    /// List all product categories.
    fn list_categories(&self) -> impl Future<Output = ApiResult<Vec<ProductCategory>>>;
}

/// Read-only operations for inquiry entities.
pub trait InquiryReader {
    /// List all inquiries (admin view).
    fn list_inquiries(&self) -> impl Future<Output = ApiResult<Vec<Inquiry>>>;
    /// Retrieve a single inquiry by its identifier.
    fn get_inquiry(&self, id: &InquiryId) -> impl Future<Output = ApiResult<Option<Inquiry>>>;
}

/// Write operations for inquiry entities.
pub trait InquiryWriter {
    /// Create a new inquiry from a visitor submission.
    fn create_inquiry(&self, inquiry: &NewInquiry) -> impl Future<Output = ApiResult<()>>;
    /// Update an existing inquiry. Supported by the API but driven by no
    /// page flow.
    fn update_inquiry(
        &self,
        id: &InquiryId,
        changes: &InquiryUpdate,
    ) -> impl Future<Output = ApiResult<Option<Inquiry>>>;
    /// Delete an inquiry.
    fn delete_inquiry(&self, id: &InquiryId) -> impl Future<Output = ApiResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_leaked_literals_are_dropped() {
        let query = ProductListQuery::default()
            .category("null")
            .search("  ")
            .limit(30);

        assert_eq!(query.to_query_pairs(), vec![("limit", "30".to_string())]);
    }

    #[test]
    fn undefined_literal_is_dropped() {
        let query = ProductListQuery::default().category("undefined");
        assert!(query.category_id.is_none());
    }

    #[test]
    fn search_is_trimmed() {
        let query = ProductListQuery::default().search("  tiller ");
        assert_eq!(query.search.as_deref(), Some("tiller"));
    }

    #[test]
    fn pairs_keep_stable_order() {
        let query = ProductListQuery::default()
            .category("c-1")
            .search("pump")
            .offset(30)
            .limit(30);

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("category_id", "c-1".to_string()),
                ("search", "pump".to_string()),
                ("offset", "30".to_string()),
                ("limit", "30".to_string()),
            ]
        );
        assert_eq!(query.cache_key(), "category_id=c-1&search=pump&offset=30&limit=30");
    }
}
