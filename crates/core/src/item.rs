//! Marketplace item snapshots and list entry status.
//!
//! An [`ItemSnapshot`] is the marketplace's current view of one item. It is
//! fetched fresh for every enriched read and every sync cycle and is never
//! the system of record.

use serde::{Deserialize, Serialize};

/// List entry has been bought.
pub const STATUS_CHECKED: &str = "checked";

/// List entry is still pending.
pub const STATUS_NOT_CHECKED: &str = "not_checked";

/// Marketplace lifecycle status of a listing that is temporarily unavailable.
pub const ITEM_STATUS_PAUSED: &str = "paused";

/// Root category used when the category lookup fails or has no path.
pub const DEFAULT_ROOT_CATEGORY: &str = "Other";

/// Checked state of an item inside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListItemStatus {
    Checked,
    NotChecked,
}

impl ListItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checked => STATUS_CHECKED,
            Self::NotChecked => STATUS_NOT_CHECKED,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            STATUS_CHECKED => Some(Self::Checked),
            STATUS_NOT_CHECKED => Some(Self::NotChecked),
            _ => None,
        }
    }
}

/// Current marketplace state of one item.
///
/// Deserializes directly from the marketplace `GET /items/{id}` body. The
/// fields the marketplace does not return there (`description`,
/// `root_category`, `reviews_quantity`) are filled in by separate lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub root_category: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub available_quantity: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub deal_ids: Vec<String>,
    #[serde(default)]
    pub catalog_product_id: Option<String>,
    #[serde(default)]
    pub reviews_quantity: i64,
}

impl ItemSnapshot {
    /// The item is on a deal: discounted below its original price and
    /// attached to at least one deal.
    pub fn has_active_deal(&self) -> bool {
        match self.original_price {
            Some(original) => self.price < original && !self.deal_ids.is_empty(),
            None => false,
        }
    }
}

/// Pick the root category name from a category's path, or
/// [`DEFAULT_ROOT_CATEGORY`] when the path is empty.
pub fn root_category_name<'a, I>(path_from_root: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    path_from_root
        .into_iter()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ROOT_CATEGORY)
        .to_string()
}
