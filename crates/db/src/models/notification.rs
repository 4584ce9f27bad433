//! Notification model.

use melist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub list_id: DbId,
    pub message: String,
    pub permalink: String,
    pub seen: bool,
    pub created_at: Timestamp,
}
