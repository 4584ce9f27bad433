//! Handlers for `/lists/{id}/notifications`.

use axum::extract::{Path, State};
use axum::Json;
use melist_core::permissions::require_read;
use melist_core::types::DbId;
use melist_db::models::notification::Notification;

use crate::engine::access;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lists/{id}/notifications
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_read(access.level)?;

    let notifications = state.store.notifications_for_list(id).await?;
    Ok(Json(DataResponse::new(notifications)))
}
