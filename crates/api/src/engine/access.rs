//! Permission checks against stored lists and grants.

use melist_core::error::CoreError;
use melist_core::permissions::{resolve_access, AccessLevel};
use melist_core::share::SHARE_ADMIN;
use melist_core::types::DbId;
use melist_db::models::list::List;
use melist_db::models::share_grant::ShareGrant;
use melist_db::Store;
use serde::Serialize;

/// A list together with the caller's resolved access on it.
#[derive(Debug, Clone)]
pub struct ListAccess {
    pub list: List,
    pub level: AccessLevel,
}

/// The caller's effective permission, reported in grant shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionView {
    pub list_id: DbId,
    pub user_id: DbId,
    pub share_type: &'static str,
}

/// Resolve the caller's level from already-loaded grants. Grants with an
/// unknown type are ignored.
pub fn access_from_grants(list: &List, caller_id: DbId, grants: &[ShareGrant]) -> AccessLevel {
    resolve_access(
        list.owner_id,
        list.privacy(),
        caller_id,
        grants
            .iter()
            .filter_map(|g| g.share_type().map(|kind| (g.user_id, kind))),
    )
}

/// Load a list and its grants and resolve `caller_id`'s access.
///
/// Fails with `NotFound` for an unknown list.
pub async fn load_access(
    store: &dyn Store,
    list_id: DbId,
    caller_id: DbId,
) -> Result<ListAccess, CoreError> {
    let list = store
        .find_list(list_id)
        .await?
        .ok_or_else(|| CoreError::not_found("List", list_id))?;
    let grants = store.grants_for_list(list_id).await?;
    let level = access_from_grants(&list, caller_id, &grants);

    Ok(ListAccess { list, level })
}

/// The caller's permission on a list, or `Forbidden` when they have none.
pub async fn user_permissions(
    store: &dyn Store,
    list_id: DbId,
    caller_id: DbId,
) -> Result<PermissionView, CoreError> {
    let access = load_access(store, list_id, caller_id).await?;

    let share_type = match access.level {
        AccessLevel::None => {
            return Err(CoreError::Forbidden(
                "you have no access to this list".to_string(),
            ))
        }
        AccessLevel::Admin => SHARE_ADMIN,
        other => other.as_str(),
    };

    Ok(PermissionView {
        list_id,
        user_id: caller_id,
        share_type,
    })
}
