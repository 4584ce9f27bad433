//! Share grant models and DTOs.

use melist_core::share::ShareType;
use melist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `share_grants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShareGrant {
    pub id: DbId,
    pub list_id: DbId,
    pub user_id: DbId,
    pub share_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ShareGrant {
    /// Parsed share type, or `None` for a value outside the known set.
    pub fn share_type(&self) -> Option<ShareType> {
        ShareType::from_str(&self.share_type)
    }
}

/// A row from the `pending_share_grants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingShareGrant {
    pub id: DbId,
    pub list_id: DbId,
    pub email: String,
    pub share_type: String,
    pub created_at: Timestamp,
}

impl PendingShareGrant {
    pub fn share_type(&self) -> Option<ShareType> {
        ShareType::from_str(&self.share_type)
    }
}

/// One requested grant in a reconcile batch, as sent by the client.
///
/// Both fields are optional at this layer so that a malformed entry can be
/// reported alongside the others instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantRequest {
    pub user_id: Option<DbId>,
    #[serde(default)]
    pub share_type: String,
}

/// Email invitation body.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteRequest {
    pub email: String,
    pub share_type: String,
}
