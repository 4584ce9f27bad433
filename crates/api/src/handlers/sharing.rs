//! Handlers for `/lists/{id}/share`.

use axum::extract::{Path, State};
use axum::Json;
use melist_core::types::DbId;
use melist_db::models::share_grant::{GrantRequest, InviteRequest, ShareGrant};

use crate::engine::sharing::{self, InviteOutcome};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lists/{id}/share
pub async fn list_grants(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ShareGrant>>>> {
    let grants = sharing::list_grants(state.store.as_ref(), id, auth.user_id).await?;
    Ok(Json(DataResponse::new(grants)))
}

/// POST /api/v1/lists/{id}/share
///
/// Body: the grants the list should have, `[{ "user_id", "share_type" }]`.
pub async fn reconcile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(desired): Json<Vec<GrantRequest>>,
) -> AppResult<Json<DataResponse<Vec<ShareGrant>>>> {
    let grants = sharing::reconcile_grants(state.store.as_ref(), id, auth.user_id, &desired).await?;
    Ok(Json(DataResponse::new(grants)))
}

/// POST /api/v1/lists/{id}/share/invite
pub async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<InviteRequest>,
) -> AppResult<Json<DataResponse<InviteOutcome>>> {
    let outcome = sharing::invite(state.store.as_ref(), id, auth.user_id, &input).await?;
    Ok(Json(DataResponse::new(outcome)))
}

/// DELETE /api/v1/lists/{id}/share/{user_id}
pub async fn revoke(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Vec<ShareGrant>>>> {
    let grants = sharing::revoke_grant(state.store.as_ref(), id, auth.user_id, user_id).await?;
    Ok(Json(DataResponse::new(grants)))
}
