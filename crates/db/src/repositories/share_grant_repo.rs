//! Repository for the `share_grants` table.

use melist_core::share::ShareType;
use melist_core::types::DbId;
use sqlx::PgPool;

use crate::models::share_grant::ShareGrant;

const COLUMNS: &str = "id, list_id, user_id, share_type, created_at, updated_at";

pub struct ShareGrantRepo;

impl ShareGrantRepo {
    pub async fn list_for_list(pool: &PgPool, list_id: DbId) -> Result<Vec<ShareGrant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM share_grants WHERE list_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, ShareGrant>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a grant. Fails with a unique violation if the user already
    /// holds one on the list.
    pub async fn create(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> Result<ShareGrant, sqlx::Error> {
        let query = format!(
            "INSERT INTO share_grants (list_id, user_id, share_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShareGrant>(&query)
            .bind(list_id)
            .bind(user_id)
            .bind(share_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Change the type of an existing grant. Returns `None` if there is none.
    ///
    /// `updated_at` only moves when the type actually changes.
    pub async fn update_type(
        pool: &PgPool,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> Result<Option<ShareGrant>, sqlx::Error> {
        let query = format!(
            "UPDATE share_grants
             SET share_type = $3,
                 updated_at = CASE WHEN share_type = $3 THEN updated_at ELSE NOW() END
             WHERE list_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShareGrant>(&query)
            .bind(list_id)
            .bind(user_id)
            .bind(share_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, list_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM share_grants WHERE list_id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
