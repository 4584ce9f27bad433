//! Repository for the `lists` table.

use melist_core::list::{ListChanges, Privacy};
use melist_core::types::DbId;
use sqlx::PgPool;

use crate::models::list::List;

const COLUMNS: &str = "id, owner_id, title, description, privacy, created_at, updated_at";

/// Same columns qualified with the `l` alias, for joins.
const QUALIFIED_COLUMNS: &str =
    "l.id, l.owner_id, l.title, l.description, l.privacy, l.created_at, l.updated_at";

pub struct ListRepo;

impl ListRepo {
    /// Insert a new list. Inputs are expected to be validated.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        title: &str,
        description: &str,
        privacy: Privacy,
    ) -> Result<List, sqlx::Error> {
        let query = format!(
            "INSERT INTO lists (owner_id, title, description, privacy)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, List>(&query)
            .bind(owner_id)
            .bind(title)
            .bind(description)
            .bind(privacy.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE id = $1");
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply the non-`None` fields of `changes`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ListChanges,
    ) -> Result<Option<List>, sqlx::Error> {
        let query = format!(
            "UPDATE lists SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                privacy = COALESCE($4, privacy),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .bind(changes.title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.privacy.map(|p| p.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Every list, oldest first. Used by the sync job.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists ORDER BY id ASC");
        sqlx::query_as::<_, List>(&query).fetch_all(pool).await
    }

    pub async fn list_by_privacy(pool: &PgPool, privacy: Privacy) -> Result<Vec<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE privacy = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, List>(&query)
            .bind(privacy.as_str())
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE owner_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, List>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Lists on which `user_id` holds a share grant.
    pub async fn list_shared_with(pool: &PgPool, user_id: DbId) -> Result<Vec<List>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM lists l
             JOIN share_grants g ON g.list_id = l.id
             WHERE g.user_id = $1
             ORDER BY l.created_at DESC"
        );
        sqlx::query_as::<_, List>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Lists the user has marked as favorite.
    pub async fn list_favorites_of(pool: &PgPool, user_id: DbId) -> Result<Vec<List>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM lists l
             JOIN favorite_lists f ON f.list_id = l.id
             WHERE f.user_id = $1
             ORDER BY f.created_at DESC"
        );
        sqlx::query_as::<_, List>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
