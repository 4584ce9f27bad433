//! The persistence seam used by the service layer.
//!
//! [`Store`] lists every read and write the services need. [`PgStore`]
//! forwards each call to the matching repository; tests substitute an
//! in-memory implementation.

use async_trait::async_trait;
use melist_core::error::CoreError;
use melist_core::history::HistorySample;
use melist_core::item::ListItemStatus;
use melist_core::list::{ListChanges, Privacy};
use melist_core::notification::NewNotification;
use melist_core::share::ShareType;
use melist_core::types::DbId;

use crate::models::item_history::ItemHistory;
use crate::models::list::List;
use crate::models::list_item::{ListItem, NewListItem};
use crate::models::notification::Notification;
use crate::models::share_grant::{PendingShareGrant, ShareGrant};
use crate::models::user::{UpsertUser, User};
use crate::repositories::{
    FavoriteRepo, ItemHistoryRepo, ListItemRepo, ListRepo, NotificationRepo, PendingGrantRepo,
    ShareGrantRepo, UserRepo,
};
use crate::DbPool;

/// Failure of a single store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backing store could not serve the request (used by non-SQL stores).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// PostgreSQL unique constraint violation (SQLSTATE 23505).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }
}

/// Classify a store failure into a domain error.
///
/// - `RowNotFound` maps to `NotFound`.
/// - Unique constraint violations map to `Validation`.
/// - Everything else is logged and mapped to `Internal`.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Database(sqlx::Error::RowNotFound) => CoreError::NotFound {
                entity: "Resource",
                id: "unknown".to_string(),
            },
            StoreError::Database(sqlx::Error::Database(db_err)) if err.is_unique_violation() => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                CoreError::Validation(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ))
            }
            other => {
                tracing::error!(error = %other, "Store error");
                CoreError::Internal(other.to_string())
            }
        }
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Succeeds when the backing store is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // -- users --
    async fn upsert_user(&self, input: &UpsertUser) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // -- lists --
    async fn create_list(
        &self,
        owner_id: DbId,
        title: &str,
        description: &str,
        privacy: Privacy,
    ) -> StoreResult<List>;
    async fn find_list(&self, id: DbId) -> StoreResult<Option<List>>;
    async fn update_list(&self, id: DbId, changes: &ListChanges) -> StoreResult<Option<List>>;
    async fn all_lists(&self) -> StoreResult<Vec<List>>;
    async fn public_lists(&self) -> StoreResult<Vec<List>>;
    async fn lists_owned_by(&self, owner_id: DbId) -> StoreResult<Vec<List>>;
    async fn lists_shared_with(&self, user_id: DbId) -> StoreResult<Vec<List>>;

    // -- favorites --
    async fn favorite_lists(&self, user_id: DbId) -> StoreResult<Vec<List>>;
    async fn add_favorite(&self, user_id: DbId, list_id: DbId) -> StoreResult<bool>;
    async fn remove_favorite(&self, user_id: DbId, list_id: DbId) -> StoreResult<bool>;

    // -- share grants --
    async fn grants_for_list(&self, list_id: DbId) -> StoreResult<Vec<ShareGrant>>;
    async fn insert_grant(
        &self,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> StoreResult<ShareGrant>;
    async fn update_grant(
        &self,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> StoreResult<Option<ShareGrant>>;
    async fn delete_grant(&self, list_id: DbId, user_id: DbId) -> StoreResult<bool>;

    // -- pending grants --
    async fn upsert_pending_grant(
        &self,
        list_id: DbId,
        email: &str,
        share_type: ShareType,
    ) -> StoreResult<PendingShareGrant>;
    async fn pending_grants_for_email(&self, email: &str) -> StoreResult<Vec<PendingShareGrant>>;
    async fn delete_pending_grant(&self, id: DbId) -> StoreResult<bool>;

    // -- list entries --
    async fn list_items(&self, list_id: DbId) -> StoreResult<Vec<ListItem>>;
    async fn find_list_item(&self, list_id: DbId, item_id: &str) -> StoreResult<Option<ListItem>>;
    async fn insert_list_item(&self, input: &NewListItem) -> StoreResult<ListItem>;
    async fn set_list_item_status(
        &self,
        list_id: DbId,
        item_id: &str,
        status: ListItemStatus,
    ) -> StoreResult<Option<ListItem>>;
    async fn delete_list_item(&self, list_id: DbId, item_id: &str) -> StoreResult<bool>;

    // -- item history --
    async fn latest_history(&self, item_id: &str) -> StoreResult<Option<ItemHistory>>;
    async fn item_history(&self, item_id: &str) -> StoreResult<Vec<ItemHistory>>;
    async fn append_history(&self, item_id: &str, sample: &HistorySample)
        -> StoreResult<ItemHistory>;

    // -- notifications --
    async fn insert_notification(&self, input: &NewNotification) -> StoreResult<Notification>;
    async fn notifications_for_list(&self, list_id: DbId) -> StoreResult<Vec<Notification>>;
}

/// [`Store`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn upsert_user(&self, input: &UpsertUser) -> StoreResult<User> {
        Ok(UserRepo::upsert(&self.pool, input).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn create_list(
        &self,
        owner_id: DbId,
        title: &str,
        description: &str,
        privacy: Privacy,
    ) -> StoreResult<List> {
        Ok(ListRepo::create(&self.pool, owner_id, title, description, privacy).await?)
    }

    async fn find_list(&self, id: DbId) -> StoreResult<Option<List>> {
        Ok(ListRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update_list(&self, id: DbId, changes: &ListChanges) -> StoreResult<Option<List>> {
        Ok(ListRepo::update(&self.pool, id, changes).await?)
    }

    async fn all_lists(&self) -> StoreResult<Vec<List>> {
        Ok(ListRepo::list_all(&self.pool).await?)
    }

    async fn public_lists(&self) -> StoreResult<Vec<List>> {
        Ok(ListRepo::list_by_privacy(&self.pool, Privacy::Public).await?)
    }

    async fn lists_owned_by(&self, owner_id: DbId) -> StoreResult<Vec<List>> {
        Ok(ListRepo::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn lists_shared_with(&self, user_id: DbId) -> StoreResult<Vec<List>> {
        Ok(ListRepo::list_shared_with(&self.pool, user_id).await?)
    }

    async fn favorite_lists(&self, user_id: DbId) -> StoreResult<Vec<List>> {
        Ok(ListRepo::list_favorites_of(&self.pool, user_id).await?)
    }

    async fn add_favorite(&self, user_id: DbId, list_id: DbId) -> StoreResult<bool> {
        Ok(FavoriteRepo::add(&self.pool, user_id, list_id).await?)
    }

    async fn remove_favorite(&self, user_id: DbId, list_id: DbId) -> StoreResult<bool> {
        Ok(FavoriteRepo::remove(&self.pool, user_id, list_id).await?)
    }

    async fn grants_for_list(&self, list_id: DbId) -> StoreResult<Vec<ShareGrant>> {
        Ok(ShareGrantRepo::list_for_list(&self.pool, list_id).await?)
    }

    async fn insert_grant(
        &self,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> StoreResult<ShareGrant> {
        Ok(ShareGrantRepo::create(&self.pool, list_id, user_id, share_type).await?)
    }

    async fn update_grant(
        &self,
        list_id: DbId,
        user_id: DbId,
        share_type: ShareType,
    ) -> StoreResult<Option<ShareGrant>> {
        Ok(ShareGrantRepo::update_type(&self.pool, list_id, user_id, share_type).await?)
    }

    async fn delete_grant(&self, list_id: DbId, user_id: DbId) -> StoreResult<bool> {
        Ok(ShareGrantRepo::delete(&self.pool, list_id, user_id).await?)
    }

    async fn upsert_pending_grant(
        &self,
        list_id: DbId,
        email: &str,
        share_type: ShareType,
    ) -> StoreResult<PendingShareGrant> {
        Ok(PendingGrantRepo::upsert(&self.pool, list_id, email, share_type).await?)
    }

    async fn pending_grants_for_email(&self, email: &str) -> StoreResult<Vec<PendingShareGrant>> {
        Ok(PendingGrantRepo::list_for_email(&self.pool, email).await?)
    }

    async fn delete_pending_grant(&self, id: DbId) -> StoreResult<bool> {
        Ok(PendingGrantRepo::delete(&self.pool, id).await?)
    }

    async fn list_items(&self, list_id: DbId) -> StoreResult<Vec<ListItem>> {
        Ok(ListItemRepo::list_for_list(&self.pool, list_id).await?)
    }

    async fn find_list_item(&self, list_id: DbId, item_id: &str) -> StoreResult<Option<ListItem>> {
        Ok(ListItemRepo::find(&self.pool, list_id, item_id).await?)
    }

    async fn insert_list_item(&self, input: &NewListItem) -> StoreResult<ListItem> {
        Ok(ListItemRepo::create(&self.pool, input).await?)
    }

    async fn set_list_item_status(
        &self,
        list_id: DbId,
        item_id: &str,
        status: ListItemStatus,
    ) -> StoreResult<Option<ListItem>> {
        Ok(ListItemRepo::set_status(&self.pool, list_id, item_id, status).await?)
    }

    async fn delete_list_item(&self, list_id: DbId, item_id: &str) -> StoreResult<bool> {
        Ok(ListItemRepo::delete(&self.pool, list_id, item_id).await?)
    }

    async fn latest_history(&self, item_id: &str) -> StoreResult<Option<ItemHistory>> {
        Ok(ItemHistoryRepo::find_latest(&self.pool, item_id).await?)
    }

    async fn item_history(&self, item_id: &str) -> StoreResult<Vec<ItemHistory>> {
        Ok(ItemHistoryRepo::list_for_item(&self.pool, item_id).await?)
    }

    async fn append_history(
        &self,
        item_id: &str,
        sample: &HistorySample,
    ) -> StoreResult<ItemHistory> {
        Ok(ItemHistoryRepo::create(&self.pool, item_id, sample).await?)
    }

    async fn insert_notification(&self, input: &NewNotification) -> StoreResult<Notification> {
        Ok(NotificationRepo::create(&self.pool, input).await?)
    }

    async fn notifications_for_list(&self, list_id: DbId) -> StoreResult<Vec<Notification>> {
        Ok(NotificationRepo::list_for_list(&self.pool, list_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: CoreError = StoreError::Database(sqlx::Error::RowNotFound).into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_other_failures_map_to_internal() {
        let err: CoreError = StoreError::Unavailable("pool closed".into()).into();
        assert!(matches!(err, CoreError::Internal(msg) if msg.contains("pool closed")));
        assert!(!StoreError::Unavailable("x".into()).is_unique_violation());
    }
}
