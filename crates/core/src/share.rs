//! Share grant types and validation.
//!
//! A share grant gives one user a fixed level of access to one list. The
//! owner's `admin` level is implicit and never stored as a grant.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::permissions::AccessLevel;
use crate::types::DbId;

/// Grantee may read the list.
pub const SHARE_READ: &str = "read";

/// Grantee may read the list and add or remove items.
pub const SHARE_WRITE: &str = "write";

/// Grantee may read the list and check or uncheck items.
pub const SHARE_CHECK: &str = "check";

/// Reported level for the list owner. Never persisted.
pub const SHARE_ADMIN: &str = "admin";

/// All share types a grant may carry.
pub const VALID_SHARE_TYPES: &[&str] = &[SHARE_READ, SHARE_WRITE, SHARE_CHECK];

/// The access a grant confers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareType {
    Read,
    Write,
    Check,
}

impl ShareType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => SHARE_READ,
            Self::Write => SHARE_WRITE,
            Self::Check => SHARE_CHECK,
        }
    }

    /// Parse a share type string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            SHARE_READ => Some(Self::Read),
            SHARE_WRITE => Some(Self::Write),
            SHARE_CHECK => Some(Self::Check),
            _ => None,
        }
    }

    /// Precedence table used when a caller holds several grants.
    ///
    /// | grant   | level   |
    /// |---------|---------|
    /// | `write` | `Write` |
    /// | `check` | `Check` |
    /// | `read`  | `Read`  |
    ///
    /// `Write` ranks above `Check`, so a write grant also allows checking.
    pub fn access_level(&self) -> AccessLevel {
        match self {
            Self::Read => AccessLevel::Read,
            Self::Check => AccessLevel::Check,
            Self::Write => AccessLevel::Write,
        }
    }
}

impl std::fmt::Display for ShareType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate one requested grant.
///
/// The returned message names the offending user so that a batch of
/// failures can be reported together.
pub fn validate_grant(user_id: Option<DbId>, share_type: &str) -> Result<(DbId, ShareType), String> {
    let user_id = match user_id {
        Some(id) if id > 0 => id,
        Some(id) => return Err(format!("invalid user id {id}")),
        None => return Err(format!("missing user id for share type '{share_type}'")),
    };

    let share_type = ShareType::from_str(share_type).ok_or_else(|| {
        format!(
            "invalid share type '{share_type}' for user {user_id}. Must be one of: {}",
            VALID_SHARE_TYPES.join(", ")
        )
    })?;

    Ok((user_id, share_type))
}

/// Validate an email invitation. Returns the normalized (trimmed,
/// lowercased) email with the parsed share type.
pub fn validate_invitation(email: &str, share_type: &str) -> Result<(String, ShareType), String> {
    let email = email.trim().to_lowercase();
    if !email.as_str().validate_email() {
        return Err(format!("invalid email '{email}'"));
    }

    let share_type = ShareType::from_str(share_type).ok_or_else(|| {
        format!(
            "invalid share type '{share_type}' for {email}. Must be one of: {}",
            VALID_SHARE_TYPES.join(", ")
        )
    })?;

    Ok((email, share_type))
}
