//! Route definitions for the `/lists` resource.
//!
//! Also nests sharing, entry, favorite and notification routes under
//! `/lists/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{favorites, list_items, lists, notifications, sharing};
use crate::state::AppState;

/// Routes mounted at `/lists`.
///
/// ```text
/// POST   /                                  -> create
/// GET    /public                            -> list_public
/// GET    /mine                              -> list_mine
/// GET    /shared                            -> list_shared
/// GET    /favorites                         -> favorites::list
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// GET    /{id}/permissions                  -> permissions
///
/// GET    /{id}/share                        -> sharing::list_grants
/// POST   /{id}/share                        -> sharing::reconcile
/// POST   /{id}/share/invite                 -> sharing::invite
/// DELETE /{id}/share/{user_id}              -> sharing::revoke
///
/// GET    /{id}/items                        -> list_items::list
/// POST   /{id}/items/{item_id}              -> list_items::add
/// GET    /{id}/items/{item_id}              -> list_items::status
/// DELETE /{id}/items/{item_id}              -> list_items::remove
/// POST   /{id}/items/{item_id}/check        -> list_items::check
/// POST   /{id}/items/{item_id}/uncheck      -> list_items::uncheck
///
/// POST   /{id}/favorite                     -> favorites::add
/// DELETE /{id}/favorite                     -> favorites::remove
///
/// GET    /{id}/notifications                -> notifications::list
/// ```
pub fn router() -> Router<AppState> {
    let share_routes = Router::new()
        .route("/", get(sharing::list_grants).post(sharing::reconcile))
        .route("/invite", post(sharing::invite))
        .route("/{user_id}", axum::routing::delete(sharing::revoke));

    let item_routes = Router::new()
        .route("/", get(list_items::list))
        .route(
            "/{item_id}",
            get(list_items::status)
                .post(list_items::add)
                .delete(list_items::remove),
        )
        .route("/{item_id}/check", post(list_items::check))
        .route("/{item_id}/uncheck", post(list_items::uncheck));

    Router::new()
        .route("/", post(lists::create))
        .route("/public", get(lists::list_public))
        .route("/mine", get(lists::list_mine))
        .route("/shared", get(lists::list_shared))
        .route("/favorites", get(favorites::list))
        .route("/{id}", get(lists::get_by_id).put(lists::update))
        .route("/{id}/permissions", get(lists::permissions))
        .route(
            "/{id}/favorite",
            post(favorites::add).delete(favorites::remove),
        )
        .route("/{id}/notifications", get(notifications::list))
        .nest("/{id}/share", share_routes)
        .nest("/{id}/items", item_routes)
}
