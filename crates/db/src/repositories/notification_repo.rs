//! Repository for the `notifications` table.

use melist_core::notification::NewNotification;
use melist_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::Notification;

const COLUMNS: &str = "id, list_id, message, permalink, seen, created_at";

pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(pool: &PgPool, input: &NewNotification) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (list_id, message, permalink)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.list_id)
            .bind(&input.message)
            .bind(&input.permalink)
            .fetch_one(pool)
            .await
    }

    /// Notifications of a list, newest first.
    pub async fn list_for_list(pool: &PgPool, list_id: DbId) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE list_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }
}
