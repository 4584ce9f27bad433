//! Share grant reconciliation.
//!
//! The owner submits the grants a list should have. Every entry is validated
//! first and all invalid entries are reported together; only a fully valid
//! batch is written. Writes are independent: a failed write does not undo
//! the others, and the failures are reported together afterwards.

use std::collections::HashMap;

use melist_core::error::CoreError;
use melist_core::permissions::require_admin;
use melist_core::share::{validate_grant, validate_invitation, ShareType};
use melist_core::types::DbId;
use melist_db::models::share_grant::{GrantRequest, InviteRequest, PendingShareGrant, ShareGrant};
use melist_db::models::user::User;
use melist_db::{Store, StoreResult};
use serde::Serialize;

use crate::engine::access::load_access;

/// Result of an email invitation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "grant", rename_all = "snake_case")]
pub enum InviteOutcome {
    /// The email belongs to a registered user, who now holds the grant.
    Granted(ShareGrant),
    /// No user has this email yet; the grant applies once they register.
    Pending(PendingShareGrant),
}

/// Update the user's grant on the list in place, or insert it.
async fn upsert_grant(
    store: &dyn Store,
    list_id: DbId,
    user_id: DbId,
    share_type: ShareType,
) -> StoreResult<ShareGrant> {
    match store.update_grant(list_id, user_id, share_type).await? {
        Some(updated) => Ok(updated),
        None => store.insert_grant(list_id, user_id, share_type).await,
    }
}

/// Grants on a list. Admin only.
pub async fn list_grants(
    store: &dyn Store,
    list_id: DbId,
    caller_id: DbId,
) -> Result<Vec<ShareGrant>, CoreError> {
    let access = load_access(store, list_id, caller_id).await?;
    require_admin(access.level)?;
    Ok(store.grants_for_list(list_id).await?)
}

/// Apply the desired grants to a list and return its full grant set.
///
/// - `Forbidden` unless the caller administers the list.
/// - `InvalidBatch` listing every malformed entry; nothing is written.
/// - `PartialFailure` listing every write that failed; successful writes
///   are kept.
///
/// Submitting the same grants twice yields the same grant set.
pub async fn reconcile_grants(
    store: &dyn Store,
    list_id: DbId,
    caller_id: DbId,
    desired: &[GrantRequest],
) -> Result<Vec<ShareGrant>, CoreError> {
    let access = load_access(store, list_id, caller_id).await?;
    require_admin(access.level)?;
    let owner_id = access.list.owner_id;

    let mut valid = Vec::with_capacity(desired.len());
    let mut invalid = Vec::new();
    for request in desired {
        match validate_grant(request.user_id, &request.share_type) {
            Ok((user_id, _)) if user_id == owner_id => {
                invalid.push(format!("user {user_id} owns the list and cannot be granted access"));
            }
            Ok(grant) => valid.push(grant),
            Err(cause) => invalid.push(cause),
        }
    }

    if !invalid.is_empty() {
        return Err(CoreError::InvalidBatch {
            message: "invalid share configuration".to_string(),
            causes: invalid,
        });
    }

    let current: HashMap<DbId, ShareType> = store
        .grants_for_list(list_id)
        .await?
        .iter()
        .filter_map(|g| g.share_type().map(|t| (g.user_id, t)))
        .collect();

    let mut failures = Vec::new();
    for (user_id, share_type) in valid {
        if current.get(&user_id) == Some(&share_type) {
            continue;
        }
        if let Err(e) = upsert_grant(store, list_id, user_id, share_type).await {
            tracing::error!(list_id, user_id, error = %e, "Failed to save share grant");
            failures.push(format!("could not save {share_type} grant for user {user_id}"));
        }
    }

    if !failures.is_empty() {
        return Err(CoreError::PartialFailure {
            message: "some share grants could not be saved".to_string(),
            causes: failures,
        });
    }

    tracing::info!(list_id, count = desired.len(), "Share grants reconciled");
    Ok(store.grants_for_list(list_id).await?)
}

/// Remove a user's grant and return the remaining grants.
///
/// A user without a grant on the list is a bad request.
pub async fn revoke_grant(
    store: &dyn Store,
    list_id: DbId,
    caller_id: DbId,
    user_id: DbId,
) -> Result<Vec<ShareGrant>, CoreError> {
    let access = load_access(store, list_id, caller_id).await?;
    require_admin(access.level)?;

    if !store.delete_grant(list_id, user_id).await? {
        return Err(CoreError::Validation(format!(
            "user {user_id} has no access to list {list_id}"
        )));
    }

    tracing::info!(list_id, user_id, "Share grant revoked");
    Ok(store.grants_for_list(list_id).await?)
}

/// Share a list with an email address.
///
/// A registered user with that email gets the grant at once; otherwise a
/// pending grant is stored and converted by [`claim_pending_grants`].
pub async fn invite(
    store: &dyn Store,
    list_id: DbId,
    caller_id: DbId,
    request: &InviteRequest,
) -> Result<InviteOutcome, CoreError> {
    let access = load_access(store, list_id, caller_id).await?;
    require_admin(access.level)?;

    let (email, share_type) =
        validate_invitation(&request.email, &request.share_type).map_err(CoreError::Validation)?;

    match store.find_user_by_email(&email).await? {
        Some(user) if user.id == access.list.owner_id => Err(CoreError::Validation(format!(
            "{email} owns the list and cannot be granted access"
        ))),
        Some(user) => {
            let grant = upsert_grant(store, list_id, user.id, share_type).await?;
            tracing::info!(list_id, user_id = user.id, "Invitation granted to registered user");
            Ok(InviteOutcome::Granted(grant))
        }
        None => {
            let pending = store.upsert_pending_grant(list_id, &email, share_type).await?;
            tracing::info!(list_id, pending_id = pending.id, "Invitation stored as pending grant");
            Ok(InviteOutcome::Pending(pending))
        }
    }
}

/// Convert the pending grants addressed to `user`'s email into real grants.
///
/// Each pending grant is handled on its own; failures are logged and leave
/// that pending grant in place for the next attempt. Returns how many were
/// converted.
pub async fn claim_pending_grants(store: &dyn Store, user: &User) -> Result<usize, CoreError> {
    if user.email.trim().is_empty() {
        return Ok(0);
    }

    let pending = store.pending_grants_for_email(&user.email).await?;
    let mut claimed = 0;

    for grant in pending {
        let Some(share_type) = grant.share_type() else {
            tracing::warn!(pending_id = grant.id, share_type = %grant.share_type, "Unknown pending share type");
            continue;
        };

        // Nothing to grant when the list is gone or the user owns it.
        let grantable = match store.find_list(grant.list_id).await {
            Ok(Some(list)) => list.owner_id != user.id,
            Ok(None) => false,
            Err(e) => {
                tracing::error!(pending_id = grant.id, error = %e, "Failed to load list for pending grant");
                continue;
            }
        };

        if grantable {
            if let Err(e) = upsert_grant(store, grant.list_id, user.id, share_type).await {
                tracing::error!(
                    pending_id = grant.id,
                    list_id = grant.list_id,
                    user_id = user.id,
                    error = %e,
                    "Failed to convert pending grant",
                );
                continue;
            }
        }

        if let Err(e) = store.delete_pending_grant(grant.id).await {
            tracing::error!(pending_id = grant.id, error = %e, "Failed to delete claimed pending grant");
        }
        claimed += 1;
    }

    if claimed > 0 {
        tracing::info!(user_id = user.id, claimed, "Pending share grants claimed");
    }
    Ok(claimed)
}
