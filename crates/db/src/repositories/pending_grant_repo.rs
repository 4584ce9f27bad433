//! Repository for the `pending_share_grants` table.

use melist_core::share::ShareType;
use melist_core::types::DbId;
use sqlx::PgPool;

use crate::models::share_grant::PendingShareGrant;

const COLUMNS: &str = "id, list_id, email, share_type, created_at";

pub struct PendingGrantRepo;

impl PendingGrantRepo {
    /// Insert or replace the pending grant for `(list_id, email)`.
    pub async fn upsert(
        pool: &PgPool,
        list_id: DbId,
        email: &str,
        share_type: ShareType,
    ) -> Result<PendingShareGrant, sqlx::Error> {
        let query = format!(
            "INSERT INTO pending_share_grants (list_id, email, share_type)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_pending_share_grants_list_email
             DO UPDATE SET share_type = EXCLUDED.share_type
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PendingShareGrant>(&query)
            .bind(list_id)
            .bind(email)
            .bind(share_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Pending grants addressed to `email` (case-insensitive).
    pub async fn list_for_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Vec<PendingShareGrant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pending_share_grants
             WHERE LOWER(email) = LOWER($1)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, PendingShareGrant>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pending_share_grants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
