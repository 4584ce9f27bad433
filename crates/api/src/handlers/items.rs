//! Handlers for the `/items` and `/categories` resources.

use axum::extract::{Path, Query, State};
use axum::Json;
use melist_core::item::ItemSnapshot;
use melist_db::models::item_history::ItemHistory;
use melist_marketplace::{ItemReviews, SearchResults, Trend};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /items/search`.
///
/// `offset` stays a string so that a non-numeric value is reported as a bad
/// request instead of a query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub offset: Option<String>,
}

/// Query parameters for `GET /items/{item_id}/reviews`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewsQuery {
    pub catalog_product_id: Option<String>,
}

/// GET /api/v1/items/search?q=&offset=
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<DataResponse<SearchResults>>> {
    let text = query.q.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("search query can't be empty".to_string()));
    }
    let offset = match query.offset.as_deref().map(str::trim) {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| AppError::BadRequest("offset must be a number".to_string()))?,
    };

    let page = state.items.search_items(text, offset).await?;
    Ok(Json(DataResponse::new(page)))
}

/// GET /api/v1/items/{item_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<DataResponse<ItemSnapshot>>> {
    let item = state.enricher().enrich_item(&item_id).await?;
    Ok(Json(DataResponse::new(item)))
}

/// GET /api/v1/items/{item_id}/history
///
/// Oldest first.
pub async fn history(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(item_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<ItemHistory>>>> {
    let records = state.store.item_history(&item_id).await?;
    Ok(Json(DataResponse::new(records)))
}

/// GET /api/v1/items/{item_id}/reviews?catalog_product_id=
pub async fn reviews(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(item_id): Path<String>,
    Query(query): Query<ReviewsQuery>,
) -> AppResult<Json<DataResponse<ItemReviews>>> {
    let reviews = state
        .items
        .fetch_reviews(&item_id, query.catalog_product_id.as_deref())
        .await
        .inspect_err(|e| tracing::error!(item_id, error = %e, "Failed to fetch item reviews"))?;
    Ok(Json(DataResponse::new(reviews)))
}

/// GET /api/v1/categories/{category_id}/trends
pub async fn category_trends(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Trend>>>> {
    let trends = state.items.fetch_category_trends(&category_id).await?;
    Ok(Json(DataResponse::new(trends)))
}
