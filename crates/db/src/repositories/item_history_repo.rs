//! Repository for the `item_history` table.

use melist_core::history::HistorySample;
use sqlx::PgPool;

use crate::models::item_history::ItemHistory;

const COLUMNS: &str = "id, item_id, price, quantity, status, has_deal, reviews_quantity, fetched_at";

pub struct ItemHistoryRepo;

impl ItemHistoryRepo {
    /// Append one record stamped with the current time.
    pub async fn create(
        pool: &PgPool,
        item_id: &str,
        sample: &HistorySample,
    ) -> Result<ItemHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO item_history (item_id, price, quantity, status, has_deal, reviews_quantity)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemHistory>(&query)
            .bind(item_id)
            .bind(sample.price)
            .bind(sample.quantity)
            .bind(&sample.status)
            .bind(sample.has_deal)
            .bind(sample.reviews_quantity)
            .fetch_one(pool)
            .await
    }

    /// The most recent record for an item, the next diff baseline.
    pub async fn find_latest(pool: &PgPool, item_id: &str) -> Result<Option<ItemHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM item_history
             WHERE item_id = $1
             ORDER BY fetched_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ItemHistory>(&query)
            .bind(item_id)
            .fetch_optional(pool)
            .await
    }

    /// Full history of an item, oldest first.
    pub async fn list_for_item(pool: &PgPool, item_id: &str) -> Result<Vec<ItemHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM item_history
             WHERE item_id = $1
             ORDER BY fetched_at ASC, id ASC"
        );
        sqlx::query_as::<_, ItemHistory>(&query)
            .bind(item_id)
            .fetch_all(pool)
            .await
    }
}
