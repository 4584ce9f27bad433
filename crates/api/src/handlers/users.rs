//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use melist_db::models::user::{UpsertUser, User};

use crate::engine::sharing;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
///
/// Registers or refreshes the caller from their marketplace identity and
/// converts any pending share grants addressed to their email.
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let identity = &auth.identity;
    let input = UpsertUser {
        id: auth.user_id,
        nickname: identity.nickname.clone(),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        email: identity.email.trim().to_lowercase(),
    };

    let user = state.store.upsert_user(&input).await?;

    match sharing::claim_pending_grants(state.store.as_ref(), &user).await {
        Ok(0) => {}
        Ok(claimed) => tracing::info!(user_id = user.id, claimed, "Claimed pending grants on login"),
        Err(e) => tracing::error!(user_id = user.id, error = %e, "Failed to claim pending grants"),
    }

    Ok(Json(DataResponse::new(user)))
}
