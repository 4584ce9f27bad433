pub mod health;
pub mod items;
pub mod lists;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/me                                        current user (registers on first call)
///
/// /lists                                           create
/// /lists/public                                    public lists
/// /lists/mine                                      caller's lists
/// /lists/shared                                    lists shared with caller
/// /lists/favorites                                 caller's favorites
/// /lists/{id}                                      get, update
/// /lists/{id}/permissions                          caller's permission
/// /lists/{id}/share                                grants, reconcile
/// /lists/{id}/share/invite                         invite by email
/// /lists/{id}/share/{user_id}                      revoke
/// /lists/{id}/items                                entries (?info=true to enrich)
/// /lists/{id}/items/{item_id}                      add, status, remove
/// /lists/{id}/items/{item_id}/check                check
/// /lists/{id}/items/{item_id}/uncheck              uncheck
/// /lists/{id}/favorite                             favorite, unfavorite
/// /lists/{id}/notifications                        notifications
///
/// /items/search                                    marketplace search (?q=&offset=)
/// /items/{item_id}                                 enriched item
/// /items/{item_id}/history                         item history
/// /items/{item_id}/reviews                         item reviews
///
/// /categories/{category_id}/trends                 trending keywords
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/lists", lists::router())
        .nest("/items", items::router())
        .nest("/categories", items::category_router())
}
