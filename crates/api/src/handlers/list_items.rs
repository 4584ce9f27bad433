//! Handlers for `/lists/{id}/items`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use melist_core::error::CoreError;
use melist_core::item::ListItemStatus;
use melist_core::notification::NewNotification;
use melist_core::permissions::{require_check, require_read, require_write};
use melist_core::types::DbId;
use melist_db::models::list_item::{ListItem, NewListItem};
use serde::{Deserialize, Serialize};

use crate::engine::access;
use crate::engine::enrichment::EnrichedListItem;
use crate::engine::notify;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /lists/{id}/items` and the entry mutations
/// that answer with the list's entries.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    /// Attach current marketplace data to every entry.
    #[serde(default)]
    pub info: bool,
}

/// Query parameters for `POST /lists/{id}/items/{item_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct AddItemQuery {
    pub variation_id: Option<i64>,
}

/// Entries of a list, plain or enriched.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListItemsView {
    Plain(Vec<ListItem>),
    Enriched(Vec<EnrichedListItem>),
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// GET /api/v1/lists/{id}/items?info=true
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Query(query): Query<ItemsQuery>,
) -> AppResult<Json<DataResponse<ListItemsView>>> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_read(access.level)?;

    let view = entries_view(&state, id, query.info).await?;
    Ok(Json(DataResponse::new(view)))
}

/// Current entries of a list, enriched when `info` is set.
async fn entries_view(state: &AppState, list_id: DbId, info: bool) -> AppResult<ListItemsView> {
    let entries = state.store.list_items(list_id).await?;
    if info {
        Ok(ListItemsView::Enriched(state.enricher().enrich_entries(entries).await?))
    } else {
        Ok(ListItemsView::Plain(entries))
    }
}

// ---------------------------------------------------------------------------
// Single entry
// ---------------------------------------------------------------------------

/// POST /api/v1/lists/{id}/items/{item_id}?variation_id=
pub async fn add(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(DbId, String)>,
    Query(query): Query<AddItemQuery>,
) -> AppResult<(StatusCode, Json<DataResponse<ListItem>>)> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_write(access.level)?;

    if state.store.find_list_item(id, &item_id).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "item {item_id} is already in the list"
        )));
    }

    let entry = state
        .store
        .insert_list_item(&NewListItem {
            list_id: id,
            item_id: item_id.clone(),
            variation_id: query.variation_id,
            added_by: auth.user_id,
        })
        .await?;

    tracing::info!(list_id = id, item_id = %item_id, user_id = auth.user_id, "Item added to list");
    notify::publish(
        state.store.as_ref(),
        &NewNotification::item_added(id, &item_id, &auth.display_name()),
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// GET /api/v1/lists/{id}/items/{item_id}
pub async fn status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<ListItem>>> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_read(access.level)?;

    let entry = state
        .store
        .find_list_item(id, &item_id)
        .await?
        .ok_or_else(|| CoreError::not_found("List item", &item_id))?;
    Ok(Json(DataResponse::new(entry)))
}

/// DELETE /api/v1/lists/{id}/items/{item_id}?info=true
///
/// Returns the remaining entries.
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(DbId, String)>,
    Query(query): Query<ItemsQuery>,
) -> AppResult<Json<DataResponse<ListItemsView>>> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_write(access.level)?;

    if !state.store.delete_list_item(id, &item_id).await? {
        return Err(CoreError::not_found("List item", &item_id).into());
    }

    tracing::info!(list_id = id, item_id = %item_id, user_id = auth.user_id, "Item removed from list");
    let view = entries_view(&state, id, query.info).await?;
    Ok(Json(DataResponse::new(view)))
}

/// POST /api/v1/lists/{id}/items/{item_id}/check?info=true
pub async fn check(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(DbId, String)>,
    Query(query): Query<ItemsQuery>,
) -> AppResult<Json<DataResponse<ListItemsView>>> {
    set_status(state, auth, id, item_id, ListItemStatus::Checked, query.info).await
}

/// POST /api/v1/lists/{id}/items/{item_id}/uncheck?info=true
pub async fn uncheck(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, item_id)): Path<(DbId, String)>,
    Query(query): Query<ItemsQuery>,
) -> AppResult<Json<DataResponse<ListItemsView>>> {
    set_status(state, auth, id, item_id, ListItemStatus::NotChecked, query.info).await
}

/// Toggle an entry and notify the list. Returns the list's entries.
async fn set_status(
    state: AppState,
    auth: AuthUser,
    id: DbId,
    item_id: String,
    status: ListItemStatus,
    info: bool,
) -> AppResult<Json<DataResponse<ListItemsView>>> {
    let access = access::load_access(state.store.as_ref(), id, auth.user_id).await?;
    require_check(access.level)?;

    state
        .store
        .set_list_item_status(id, &item_id, status)
        .await?
        .ok_or_else(|| CoreError::not_found("List item", &item_id))?;

    let actor = auth.display_name();
    let notification = match status {
        ListItemStatus::Checked => NewNotification::item_checked(id, &item_id, &actor),
        ListItemStatus::NotChecked => NewNotification::item_unchecked(id, &item_id, &actor),
    };
    notify::publish(state.store.as_ref(), &notification).await;

    let view = entries_view(&state, id, info).await?;
    Ok(Json(DataResponse::new(view)))
}
