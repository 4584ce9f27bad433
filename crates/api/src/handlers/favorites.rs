//! Handlers for favorite lists.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use melist_core::notification::NewNotification;
use melist_core::permissions::require_read;
use melist_core::types::DbId;
use melist_db::models::list::List;

use crate::engine::{access, notify};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lists/favorites
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<List>>>> {
    let lists = state.store.favorite_lists(auth.user_id).await?;
    Ok(Json(DataResponse::new(lists)))
}

/// POST /api/v1/lists/{id}/favorite
///
/// The caller must be able to read the list. Favoriting twice is a no-op.
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_read(access.level)?;

    if state.store.add_favorite(auth.user_id, id).await? {
        notify::publish(
            state.store.as_ref(),
            &NewNotification::list_favorited(id, &auth.display_name()),
        )
        .await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/lists/{id}/favorite
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.store.remove_favorite(auth.user_id, id).await? {
        return Err(AppError::BadRequest(format!(
            "list {id} is not in your favorites"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
