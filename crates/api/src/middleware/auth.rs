//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use melist_core::error::CoreError;
use melist_core::types::DbId;
use melist_marketplace::{CallerIdentity, MarketplaceError};

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer <token>`
/// header by the configured [`IdentityValidator`](melist_marketplace::IdentityValidator).
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Marketplace user id.
    pub user_id: DbId,
    pub identity: CallerIdentity,
}

impl AuthUser {
    /// Name shown in notifications about this caller's actions.
    pub fn display_name(&self) -> String {
        let nickname = self.identity.nickname.trim();
        if nickname.is_empty() {
            format!("user {}", self.user_id)
        } else {
            nickname.to_string()
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let identity = state.identity.validate(token).await.map_err(|e| match e {
            MarketplaceError::Unauthorized(_) | MarketplaceError::NotFound { .. } => {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            }
            other => AppError::InternalError(format!("token validation failed: {other}")),
        })?;

        Ok(AuthUser {
            user_id: identity.id,
            identity,
        })
    }
}
