//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET    /search?q=&offset=                 -> search
/// GET    /{item_id}                         -> get_by_id
/// GET    /{item_id}/history                 -> history
/// GET    /{item_id}/reviews                 -> reviews
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(items::search))
        .route("/{item_id}", get(items::get_by_id))
        .route("/{item_id}/history", get(items::history))
        .route("/{item_id}/reviews", get(items::reviews))
}

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /{category_id}/trends              -> category_trends
/// ```
pub fn category_router() -> Router<AppState> {
    Router::new().route("/{category_id}/trends", get(items::category_trends))
}
