//! User entity model and DTOs.

use melist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table. The id is the marketplace user id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering or refreshing a user from a validated identity.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub id: DbId,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
