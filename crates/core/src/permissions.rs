//! Effective access of a caller on a list.
//!
//! [`resolve_access`] is a pure decision over already-loaded state: the
//! list's owner and privacy plus the list's share grants. The `require_*`
//! helpers turn an insufficient level into [`CoreError::Forbidden`].

use serde::Serialize;

use crate::error::CoreError;
use crate::list::Privacy;
use crate::share::ShareType;
use crate::types::DbId;

/// Access levels, totally ordered from no access to full control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    None,
    Read,
    Check,
    Write,
    Admin,
}

impl AccessLevel {
    pub fn can_read(self) -> bool {
        self >= Self::Read
    }

    /// Toggle the checked state of items.
    pub fn can_check(self) -> bool {
        self >= Self::Check
    }

    /// Add or remove items.
    pub fn can_write(self) -> bool {
        self >= Self::Write
    }

    /// Update the list itself and manage its grants.
    pub fn can_admin(self) -> bool {
        self == Self::Admin
    }

    /// Name reported to clients, matching the grant vocabulary.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Check => "check",
            Self::Write => "write",
            Self::Admin => "admin",
        }
    }
}

/// Resolve the caller's access on a list.
///
/// 1. The owner is `Admin` regardless of privacy.
/// 2. A caller holding grants gets the highest level among them
///    (see [`ShareType::access_level`]).
/// 3. Anyone else may read a public list.
/// 4. Otherwise the caller has no access.
pub fn resolve_access<I>(owner_id: DbId, privacy: Privacy, caller_id: DbId, grants: I) -> AccessLevel
where
    I: IntoIterator<Item = (DbId, ShareType)>,
{
    if caller_id == owner_id {
        return AccessLevel::Admin;
    }

    let granted = grants
        .into_iter()
        .filter(|(user_id, _)| *user_id == caller_id)
        .map(|(_, share_type)| share_type.access_level())
        .max();

    match (granted, privacy) {
        (Some(level), _) => level,
        (None, Privacy::Public) => AccessLevel::Read,
        (None, Privacy::Private) => AccessLevel::None,
    }
}

pub fn require_read(level: AccessLevel) -> Result<(), CoreError> {
    require(level.can_read(), "you have no access to this list")
}

pub fn require_check(level: AccessLevel) -> Result<(), CoreError> {
    require(level.can_check(), "you have no access to check items on this list")
}

pub fn require_write(level: AccessLevel) -> Result<(), CoreError> {
    require(level.can_write(), "you have no access to modify items on this list")
}

pub fn require_admin(level: AccessLevel) -> Result<(), CoreError> {
    require(level.can_admin(), "you have no access to update this list")
}

fn require(allowed: bool, message: &str) -> Result<(), CoreError> {
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(message.to_string()))
    }
}
