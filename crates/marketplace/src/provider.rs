//! Traits the service layer uses to reach the marketplace.

use async_trait::async_trait;
use melist_core::item::ItemSnapshot;

use crate::error::MarketplaceError;
use crate::types::{CallerIdentity, Category, ItemReviews, SearchResults, Trend};

/// Read access to marketplace item data.
#[async_trait]
pub trait ItemProvider: Send + Sync {
    /// Item as returned by `GET /items/{id}`, without description, root
    /// category or review count.
    /// One page of free-text search results starting at `offset`.
    async fn search_items(&self, query: &str, offset: u32) -> Result<SearchResults, MarketplaceError>;

    async fn fetch_item(&self, item_id: &str) -> Result<ItemSnapshot, MarketplaceError>;

    /// Plain-text description of an item.
    async fn fetch_description(&self, item_id: &str) -> Result<String, MarketplaceError>;

    async fn fetch_reviews(
        &self,
        item_id: &str,
        catalog_product_id: Option<&str>,
    ) -> Result<ItemReviews, MarketplaceError>;

    async fn fetch_category(&self, category_id: &str) -> Result<Category, MarketplaceError>;

    async fn fetch_category_trends(&self, category_id: &str) -> Result<Vec<Trend>, MarketplaceError>;

    /// Stock shown on the item's public page, or `None` when the page does
    /// not carry it.
    async fn fetch_realtime_stock(&self, permalink: &str) -> Result<Option<i32>, MarketplaceError>;
}

/// Resolves an access token to the user it belongs to.
#[async_trait]
pub trait IdentityValidator: Send + Sync {
    async fn validate(&self, access_token: &str) -> Result<CallerIdentity, MarketplaceError>;
}
