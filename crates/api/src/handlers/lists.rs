//! Handlers for the `/lists` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use melist_core::error::CoreError;
use melist_core::list::{validate_privacy, validate_title, ListChanges};
use melist_core::permissions::{require_admin, require_read};
use melist_core::types::DbId;
use melist_db::models::list::{CreateList, List, UpdateList};

use crate::engine::access::{self, PermissionView};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// POST /api/v1/lists
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateList>,
) -> AppResult<(StatusCode, Json<DataResponse<List>>)> {
    validate_title(&input.title).map_err(AppError::BadRequest)?;
    let privacy = validate_privacy(&input.privacy).map_err(AppError::BadRequest)?;

    let list = state
        .store
        .create_list(auth.user_id, input.title.trim(), &input.description, privacy)
        .await?;

    tracing::info!(list_id = list.id, owner_id = auth.user_id, "List created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(list))))
}

/// GET /api/v1/lists/public
pub async fn list_public(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<List>>>> {
    let lists = state.store.public_lists().await?;
    Ok(Json(DataResponse::new(lists)))
}

/// GET /api/v1/lists/mine
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<List>>>> {
    let lists = state.store.lists_owned_by(auth.user_id).await?;
    Ok(Json(DataResponse::new(lists)))
}

/// GET /api/v1/lists/shared
///
/// Responds 404 when nothing is shared with the caller.
pub async fn list_shared(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<List>>>> {
    let lists = state.store.lists_shared_with(auth.user_id).await?;
    if lists.is_empty() {
        return Err(CoreError::not_found("Shared lists for user", auth.user_id).into());
    }
    Ok(Json(DataResponse::new(lists)))
}

// ---------------------------------------------------------------------------
// Single list
// ---------------------------------------------------------------------------

/// GET /api/v1/lists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<List>>> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_read(access.level)?;
    Ok(Json(DataResponse::new(access.list)))
}

/// PUT /api/v1/lists/{id}
///
/// Owner only. Absent, empty or invalid fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateList>,
) -> AppResult<Json<DataResponse<List>>> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_admin(access.level)?;

    let changes = ListChanges::from_input(
        input.title.as_deref(),
        input.description.as_deref(),
        input.privacy.as_deref(),
    );
    if changes.is_empty() {
        return Ok(Json(DataResponse::new(access.list)));
    }

    let list = state
        .store
        .update_list(id, &changes)
        .await?
        .ok_or_else(|| CoreError::not_found("List", id))?;

    tracing::info!(list_id = id, "List updated");
    Ok(Json(DataResponse::new(list)))
}

/// GET /api/v1/lists/{id}/permissions
pub async fn permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PermissionView>>> {
    let view = access::user_permissions(state.store.as_ref(), id, auth.user_id).await?;
    Ok(Json(DataResponse::new(view)))
}
