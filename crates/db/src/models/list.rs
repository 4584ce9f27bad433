//! List entity model and DTOs.

use melist_core::list::Privacy;
use melist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct List {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub description: String,
    pub privacy: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl List {
    /// Parsed privacy. The column is constrained, so an unknown value only
    /// appears if the constraint was dropped; treat it as private.
    pub fn privacy(&self) -> Privacy {
        Privacy::from_str(&self.privacy).unwrap_or(Privacy::Private)
    }
}

/// DTO for creating a list. The owner comes from the caller, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateList {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub privacy: String,
}

/// DTO for updating a list. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateList {
    pub title: Option<String>,
    pub description: Option<String>,
    pub privacy: Option<String>,
}
