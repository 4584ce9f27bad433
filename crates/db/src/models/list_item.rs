//! List entry model and DTOs.

use melist_core::item::ListItemStatus;
use melist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `list_items` table: one marketplace item tracked by a list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListItem {
    pub id: DbId,
    pub list_id: DbId,
    pub item_id: String,
    pub variation_id: Option<i64>,
    pub status: String,
    pub added_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ListItem {
    pub fn status(&self) -> Option<ListItemStatus> {
        ListItemStatus::from_str(&self.status)
    }
}

/// DTO for adding an item to a list. New entries start unchecked.
#[derive(Debug, Clone)]
pub struct NewListItem {
    pub list_id: DbId,
    pub item_id: String,
    pub variation_id: Option<i64>,
    pub added_by: DbId,
}
