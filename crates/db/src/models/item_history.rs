//! Item history model.

use melist_core::history::HistorySample;
use melist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `item_history` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemHistory {
    pub id: DbId,
    pub item_id: String,
    pub price: f64,
    pub quantity: i32,
    pub status: String,
    pub has_deal: bool,
    pub reviews_quantity: i64,
    pub fetched_at: Timestamp,
}

impl ItemHistory {
    /// The comparable part of the record, used as a diff baseline.
    pub fn sample(&self) -> HistorySample {
        HistorySample {
            price: self.price,
            quantity: self.quantity,
            status: self.status.clone(),
            has_deal: self.has_deal,
            reviews_quantity: self.reviews_quantity,
        }
    }
}
