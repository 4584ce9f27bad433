//! Repository for the `list_items` table.

use melist_core::item::ListItemStatus;
use melist_core::types::DbId;
use sqlx::PgPool;

use crate::models::list_item::{ListItem, NewListItem};

const COLUMNS: &str = "id, list_id, item_id, variation_id, status, added_by, created_at, updated_at";

pub struct ListItemRepo;

impl ListItemRepo {
    /// Entries of a list in insertion order.
    pub async fn list_for_list(pool: &PgPool, list_id: DbId) -> Result<Vec<ListItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM list_items WHERE list_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, ListItem>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        list_id: DbId,
        item_id: &str,
    ) -> Result<Option<ListItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM list_items WHERE list_id = $1 AND item_id = $2");
        sqlx::query_as::<_, ListItem>(&query)
            .bind(list_id)
            .bind(item_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an entry with status `not_checked`.
    pub async fn create(pool: &PgPool, input: &NewListItem) -> Result<ListItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO list_items (list_id, item_id, variation_id, status, added_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListItem>(&query)
            .bind(input.list_id)
            .bind(&input.item_id)
            .bind(input.variation_id)
            .bind(ListItemStatus::NotChecked.as_str())
            .bind(input.added_by)
            .fetch_one(pool)
            .await
    }

    /// Returns `None` if the entry does not exist.
    pub async fn set_status(
        pool: &PgPool,
        list_id: DbId,
        item_id: &str,
        status: ListItemStatus,
    ) -> Result<Option<ListItem>, sqlx::Error> {
        let query = format!(
            "UPDATE list_items SET status = $3, updated_at = NOW()
             WHERE list_id = $1 AND item_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListItem>(&query)
            .bind(list_id)
            .bind(item_id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, list_id: DbId, item_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_items WHERE list_id = $1 AND item_id = $2")
            .bind(list_id)
            .bind(item_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
