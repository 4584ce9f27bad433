//! Repository for the `favorite_lists` table.

use melist_core::types::DbId;
use sqlx::PgPool;

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Mark a list as favorite. Returns `false` if it already was.
    pub async fn add(pool: &PgPool, user_id: DbId, list_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO favorite_lists (user_id, list_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_favorite_lists_user_list DO NOTHING",
        )
        .bind(user_id)
        .bind(list_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn remove(pool: &PgPool, user_id: DbId, list_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorite_lists WHERE user_id = $1 AND list_id = $2")
            .bind(user_id)
            .bind(list_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
