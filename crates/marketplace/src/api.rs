//! REST client for the marketplace HTTP endpoints.
//!
//! Wraps search, item, description, review, category, trend and user
//! lookups plus the
//! public item page used for the real-time stock lookup, using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use melist_core::item::ItemSnapshot;
use melist_core::stock::parse_available_stock;
use reqwest::StatusCode;

use crate::error::MarketplaceError;
use crate::provider::{IdentityValidator, ItemProvider};
use crate::types::{CallerIdentity, Category, ItemDescription, ItemReviews, SearchResults, Trend};

/// Default public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.mercadolibre.com";

/// Default marketplace site for search and trends.
pub const DEFAULT_SITE_ID: &str = "MLA";

/// Maximum reviews requested per lookup.
const REVIEWS_PAGE_LIMIT: &str = "200";

/// Endpoint root and per-request timeouts.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    pub base_url: String,
    /// Site searched and queried for trends.
    pub site_id: String,
    /// Items, descriptions and categories.
    pub item_timeout: Duration,
    pub reviews_timeout: Duration,
    /// Users lookup during token validation.
    pub users_timeout: Duration,
    pub stock_timeout: Duration,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_id: DEFAULT_SITE_ID.to_string(),
            item_timeout: Duration::from_secs(15),
            reviews_timeout: Duration::from_secs(5),
            users_timeout: Duration::from_secs(5),
            stock_timeout: Duration::from_secs(5),
        }
    }
}

impl MarketplaceConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

/// HTTP client for the marketplace API.
pub struct MarketplaceClient {
    client: reqwest::Client,
    config: MarketplaceConfig,
}

impl MarketplaceClient {
    pub fn new(config: MarketplaceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    ///
    /// 404 becomes [`MarketplaceError::NotFound`] for `resource`/`id`; any
    /// other failure status becomes [`MarketplaceError::Api`] carrying the
    /// body text.
    async fn ensure_success(
        response: reqwest::Response,
        resource: &'static str,
        id: &str,
    ) -> Result<reqwest::Response, MarketplaceError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketplaceError::NotFound {
                resource,
                id: id.to_string(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MarketplaceError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        resource: &'static str,
        id: &str,
    ) -> Result<T, MarketplaceError> {
        let response = Self::ensure_success(response, resource, id).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| MarketplaceError::Decode(format!("{resource} {id}: {e}")))
    }
}

#[async_trait]
impl ItemProvider for MarketplaceClient {
    async fn search_items(&self, query: &str, offset: u32) -> Result<SearchResults, MarketplaceError> {
        let response = self
            .client
            .get(self.url(&format!("/sites/{}/search", self.config.site_id)))
            .query(&[("q", query.to_string()), ("offset", offset.to_string())])
            .timeout(self.config.item_timeout)
            .send()
            .await?;

        Self::parse_response(response, "Search", query).await
    }

    async fn fetch_item(&self, item_id: &str) -> Result<ItemSnapshot, MarketplaceError> {
        let response = self
            .client
            .get(self.url(&format!("/items/{item_id}")))
            .timeout(self.config.item_timeout)
            .send()
            .await?;

        Self::parse_response(response, "Item", item_id).await
    }

    async fn fetch_description(&self, item_id: &str) -> Result<String, MarketplaceError> {
        let response = self
            .client
            .get(self.url(&format!("/items/{item_id}/description")))
            .timeout(self.config.item_timeout)
            .send()
            .await?;

        let description: ItemDescription =
            Self::parse_response(response, "Item description", item_id).await?;
        Ok(description.plain_text)
    }

    async fn fetch_reviews(
        &self,
        item_id: &str,
        catalog_product_id: Option<&str>,
    ) -> Result<ItemReviews, MarketplaceError> {
        let mut query = vec![
            ("limit", REVIEWS_PAGE_LIMIT),
            ("order", "desc"),
            ("order_criteria", "dateCreated"),
        ];
        if let Some(product_id) = catalog_product_id.filter(|p| !p.is_empty()) {
            query.push(("catalog_product_id", product_id));
        }

        let response = self
            .client
            .get(self.url(&format!("/reviews/item/{item_id}")))
            .query(&query)
            .timeout(self.config.reviews_timeout)
            .send()
            .await?;

        Self::parse_response(response, "Item reviews", item_id).await
    }

    async fn fetch_category(&self, category_id: &str) -> Result<Category, MarketplaceError> {
        let response = self
            .client
            .get(self.url(&format!("/categories/{category_id}")))
            .timeout(self.config.item_timeout)
            .send()
            .await?;

        Self::parse_response(response, "Category", category_id).await
    }

    async fn fetch_category_trends(&self, category_id: &str) -> Result<Vec<Trend>, MarketplaceError> {
        let response = self
            .client
            .get(self.url(&format!("/trends/{}/{category_id}", self.config.site_id)))
            .timeout(self.config.item_timeout)
            .send()
            .await?;

        Self::parse_response(response, "Category trends", category_id).await
    }

    async fn fetch_realtime_stock(&self, permalink: &str) -> Result<Option<i32>, MarketplaceError> {
        let response = self
            .client
            .get(permalink)
            .timeout(self.config.stock_timeout)
            .send()
            .await?;

        let page = Self::ensure_success(response, "Item page", permalink)
            .await?
            .text()
            .await?;

        parse_available_stock(&page).map_err(MarketplaceError::Decode)
    }
}

#[async_trait]
impl IdentityValidator for MarketplaceClient {
    async fn validate(&self, access_token: &str) -> Result<CallerIdentity, MarketplaceError> {
        let response = self
            .client
            .get(self.url("/users/me"))
            .bearer_auth(access_token)
            .timeout(self.config.users_timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!(status = %response.status(), "Marketplace rejected access token");
                Err(MarketplaceError::Unauthorized(
                    "invalid or expired access token".to_string(),
                ))
            }
            _ => Self::parse_response(response, "User", "me").await,
        }
    }
}
