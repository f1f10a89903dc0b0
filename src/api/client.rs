//! Production REST client backed by `reqwest`.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;

use crate::api::envelope::{normalize_list, normalize_single};
use crate::api::error::{ApiError, ApiErrorBody, ApiResult};
use crate::api::{CatalogReader, InquiryReader, InquiryWriter, ProductListQuery};
use crate::domain::category::ProductCategory;
use crate::domain::inquiry::{Inquiry, InquiryUpdate, NewInquiry};
use crate::domain::product::Product;
use crate::domain::types::{InquiryId, ProductId};

/// Client for the remote catalog/inquiry API.
///
/// The underlying `reqwest::Client` is an `Arc` internally, so the whole
/// struct is cheap to clone. A per-request bearer token is attached via
/// [`with_bearer`](Self::with_bearer), which clones the client rather than
/// mutating shared state.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl RestClient {
    /// Create a client against the API base URL from configuration.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: None,
        }
    }

    /// Returns a copy of this client that attaches `Bearer {token}` to every
    /// outgoing request. Used to forward the visitor's `token` cookie.
    pub fn with_bearer(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            bearer: Some(token.into()),
        }
    }

    /// API base URL (without a trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Executes a request and maps the response to either raw JSON or an
    /// [`ApiError`], mirroring the status handling the API expects from its
    /// consumers: 401/403/404/500 are distinguished, everything else
    /// non-successful keeps its structured body for message extraction.
    async fn send(&self, builder: RequestBuilder) -> ApiResult<serde_json::Value> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                return Ok(serde_json::Value::Null);
            }
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            if bytes.is_empty() {
                return Ok(serde_json::Value::Null);
            }
            return serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()));
        }

        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { code: body.code },
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => ApiError::Server,
            _ => ApiError::Rejected {
                status: status.as_u16(),
                body,
            },
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult<serde_json::Value> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<serde_json::Value> {
        self.send(self.request(method, path).json(body)).await
    }
}

impl CatalogReader for RestClient {
    async fn list_products(&self, query: &ProductListQuery) -> ApiResult<Vec<Product>> {
        let raw = self.get("/products", &query.to_query_pairs()).await?;
        Ok(normalize_list(raw))
    }

    async fn get_product(&self, id: &ProductId) -> ApiResult<Option<Product>> {
        let raw = match self.get(&format!("/products/{id}"), &[]).await {
            Ok(raw) => raw,
            Err(ApiError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(normalize_single(raw))
    }

    async fn list_categories(&self) -> ApiResult<Vec<ProductCategory>> {
        let raw = self.get("/product-categories", &[]).await?;
        Ok(normalize_list(raw))
    }
}

impl InquiryReader for RestClient {
    async fn list_inquiries(&self) -> ApiResult<Vec<Inquiry>> {
        let raw = self.get("/inquiry", &[]).await?;
        Ok(normalize_list(raw))
    }

    async fn get_inquiry(&self, id: &InquiryId) -> ApiResult<Option<Inquiry>> {
        let raw = match self.get(&format!("/inquiry/{id}"), &[]).await {
            Ok(raw) => raw,
            Err(ApiError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(normalize_single(raw))
    }
}

impl InquiryWriter for RestClient {
    async fn create_inquiry(&self, inquiry: &NewInquiry) -> ApiResult<()> {
        self.send_json(Method::POST, "/inquiry", inquiry).await?;
        Ok(())
    }

    async fn update_inquiry(
        &self,
        id: &InquiryId,
        changes: &InquiryUpdate,
    ) -> ApiResult<Option<Inquiry>> {
        let raw = self
            .send_json(Method::PUT, &format!("/inquiry/{id}"), changes)
            .await?;
        Ok(normalize_single(raw))
    }

    async fn delete_inquiry(&self, id: &InquiryId) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, &format!("/inquiry/{id}")))
            .await?;
        Ok(())
    }
}
