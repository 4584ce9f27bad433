//! Response bodies of the marketplace endpoints we read.

use melist_core::item::ItemSnapshot;
use melist_core::types::DbId;
use serde::{Deserialize, Serialize};

/// `GET /items/{id}/description`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemDescription {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub limit: i64,
}

/// One buyer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Numeric or string depending on the review source.
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub rate: i32,
    #[serde(default)]
    pub likes: i32,
    #[serde(default)]
    pub dislikes: i32,
}

/// `GET /reviews/item/{id}`, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemReviews {
    #[serde(default)]
    pub paging: Paging,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub rating_average: f32,
}

impl ItemReviews {
    /// Number of reviews the item has.
    pub fn total(&self) -> i64 {
        self.paging.total
    }
}

/// `GET /sites/{site}/search`. One page of matching items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub paging: Paging,
    #[serde(default)]
    pub results: Vec<ItemSnapshot>,
}

/// A trending search keyword in a category (`GET /trends/{site}/{category}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub keyword: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
}

/// `GET /categories/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path_from_root: Vec<CategoryNode>,
}

impl Category {
    /// Names from the root category down to this one.
    pub fn path_names(&self) -> impl Iterator<Item = &str> {
        self.path_from_root.iter().map(|node| node.name.as_str())
    }
}

/// The user behind a validated access token (`GET /users/me`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub id: DbId,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}
