//! Gift API client implementation.
//!
//! Plain REST calls with `reqwest`; public catalog reads are cached with
//! `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use giftbox_core::ProductId;

use super::ApiError;
use super::types::{
    Category, Credentials, OrderItem, OrderRequest, Product, ProductOption, TokenResponse, Wish,
};

/// Cached catalog responses.
#[derive(Clone)]
enum CacheValue {
    Categories(Vec<Category>),
    Options(Vec<ProductOption>),
}

/// Client for the gift API.
///
/// Cheaply cloneable; holds no credentials of its own - bearer tokens are
/// passed per call by the authenticated flows.
#[derive(Clone)]
pub struct GiftApiClient {
    inner: Arc<GiftApiClientInner>,
}

struct GiftApiClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl GiftApiClient {
    /// Create a new gift API client for the given base URL.
    ///
    /// A trailing slash on `base_url` is tolerated.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(GiftApiClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// The absolute URL of the social-login endpoint.
    ///
    /// The browser is redirected here directly; the provider flow returns to
    /// our callback route with a token.
    #[must_use]
    pub fn kakao_login_url(&self) -> String {
        self.url("/api/members/kakao")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Map a non-success status to an [`ApiError`].
    fn status_error(status: StatusCode, path: &str, body: &str) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
            _ => ApiError::Status {
                status: status.as_u16(),
                message: snippet(body, 200),
            },
        }
    }

    /// Send a request and decode the JSON response body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path = %path,
                body = %snippet(&text, 500),
                "gift API returned non-success status"
            );
            return Err(Self::status_error(status, path, &text));
        }

        match serde_json::from_str(&text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %path,
                    body = %snippet(&text, 500),
                    "Failed to parse gift API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// Send a request whose response body is irrelevant.
    async fn execute_no_content(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let text = response.text().await?;
            tracing::error!(
                status = %status,
                path = %path,
                body = %snippet(&text, 500),
                "gift API returned non-success status"
            );
            return Err(Self::status_error(status, path, &text));
        }

        Ok(())
    }

    // =========================================================================
    // Catalog Methods (public, cached)
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        const CACHE_KEY: &str = "categories";

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let path = "/api/categories";
        let request = self.inner.client.get(self.url(path));
        let categories: Vec<Category> = self.execute(request, path).await?;

        self.inner
            .cache
            .insert(
                CACHE_KEY.to_string(),
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// List the options of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product_options(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductOption>, ApiError> {
        let cache_key = format!("options:{product_id}");

        if let Some(CacheValue::Options(options)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product options");
            return Ok(options);
        }

        let path = format!("/api/products/{product_id}/options");
        let request = self.inner.client.get(self.url(&path));
        let options: Vec<ProductOption> = self.execute(request, &path).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Options(options.clone()))
            .await;

        Ok(options)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn get_product(
        &self,
        product_id: ProductId,
        token: &str,
    ) -> Result<Product, ApiError> {
        let path = format!("/api/products/{product_id}");
        let request = self.inner.client.get(self.url(&path)).bearer_auth(token);
        self.execute(request, &path).await
    }

    // =========================================================================
    // Order Methods (not cached - mutable state)
    // =========================================================================

    /// Create an order.
    ///
    /// Succeeds only on `201 Created`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the backend responds
    /// with anything other than `201 Created`.
    #[instrument(skip(self, token, order))]
    pub async fn create_order(&self, token: &str, order: &OrderRequest) -> Result<(), ApiError> {
        let path = "/api/orders";
        let response = self
            .inner
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(order)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ApiError::RateLimited(retry_after));
        }

        if status == StatusCode::CREATED {
            return Ok(());
        }

        let text = response.text().await?;
        tracing::error!(
            status = %status,
            body = %snippet(&text, 500),
            "order creation did not return 201 Created"
        );
        Err(Self::status_error(status, path, &text))
    }

    /// List past orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn get_orders(
        &self,
        token: &str,
        page: u32,
        size: u32,
    ) -> Result<Vec<OrderItem>, ApiError> {
        let path = format!("/api/orders?page={page}&size={size}&sort=orderDateTime,desc");
        let request = self.inner.client.get(self.url(&path)).bearer_auth(token);
        self.execute(request, &path).await
    }

    // =========================================================================
    // Wishlist Methods (not cached - mutable state)
    // =========================================================================

    /// List the wishlist, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn get_wishes(&self, token: &str) -> Result<Vec<Wish>, ApiError> {
        let path = "/api/wishes?page=0&size=10&sort=createdDate,desc";
        let request = self.inner.client.get(self.url(path)).bearer_auth(token);
        self.execute(request, path).await
    }

    /// Add a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn add_wish(&self, token: &str, product_id: ProductId) -> Result<(), ApiError> {
        let path = format!("/api/wishes/{product_id}");
        let request = self
            .inner
            .client
            .post(self.url(&path))
            .bearer_auth(token)
            .json(&serde_json::json!({}));
        self.execute_no_content(request, &path).await
    }

    /// Remove a product from the wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(product_id = %product_id))]
    pub async fn remove_wish(&self, token: &str, product_id: ProductId) -> Result<(), ApiError> {
        let path = format!("/api/wishes/{product_id}");
        let request = self.inner.client.delete(self.url(&path)).bearer_auth(token);
        self.execute_no_content(request, &path).await
    }

    // =========================================================================
    // Authentication Methods
    // =========================================================================

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.authenticate("/api/members/login", email, password)
            .await
    }

    /// Register a new member.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected or the request fails.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.authenticate("/api/members/register", email, password)
            .await
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = self.inner.client.post(self.url(path)).json(&credentials);
        self.execute(request, path).await
    }
}

/// Truncate a response body for logs and error messages.
fn snippet(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = GiftApiClient::new("http://localhost:8080/");
        assert_eq!(
            client.url("/api/categories"),
            "http://localhost:8080/api/categories"
        );
    }

    #[test]
    fn test_kakao_login_url() {
        let client = GiftApiClient::new("https://api.gift.example.com");
        assert_eq!(
            client.kakao_login_url(),
            "https://api.gift.example.com/api/members/kakao"
        );
    }

    #[test]
    fn test_status_error_unauthorized() {
        let err = GiftApiClient::status_error(StatusCode::UNAUTHORIZED, "/api/wishes", "");
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_status_error_not_found_carries_path() {
        let err = GiftApiClient::status_error(StatusCode::NOT_FOUND, "/api/products/42", "");
        match err {
            ApiError::NotFound(path) => assert_eq!(path, "/api/products/42"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_status_error_other_truncates_body() {
        let body = "x".repeat(500);
        let err = GiftApiClient::status_error(StatusCode::INTERNAL_SERVER_ERROR, "/api", &body);
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message.chars().count(), 200);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_snippet_short_input() {
        assert_eq!(snippet("abc", 200), "abc");
    }
}
