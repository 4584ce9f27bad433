//! Best-effort notification inserts.

use melist_core::notification::NewNotification;
use melist_db::Store;

/// Store a notification. A failed insert is logged and reported as `false`;
/// it never fails the surrounding operation.
pub async fn publish(store: &dyn Store, notification: &NewNotification) -> bool {
    match store.insert_notification(notification).await {
        Ok(saved) => {
            tracing::debug!(
                list_id = saved.list_id,
                notification_id = saved.id,
                "Notification stored",
            );
            true
        }
        Err(e) => {
            tracing::error!(
                list_id = notification.list_id,
                error = %e,
                "Failed to store notification",
            );
            false
        }
    }
}
