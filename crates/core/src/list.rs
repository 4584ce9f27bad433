//! List privacy and field validation.
//!
//! A list is either `private` (visible to its owner and the users it is
//! shared with) or `public` (readable by anyone).

use serde::{Deserialize, Serialize};

/// Privacy value for lists visible only to the owner and grantees.
pub const PRIVACY_PRIVATE: &str = "private";

/// Privacy value for lists readable by every authenticated user.
pub const PRIVACY_PUBLIC: &str = "public";

/// All valid privacy values.
pub const VALID_PRIVACIES: &[&str] = &[PRIVACY_PRIVATE, PRIVACY_PUBLIC];

/// Maximum length of a list title.
pub const MAX_TITLE_LEN: usize = 120;

/// List privacy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    Private,
    Public,
}

impl Privacy {
    /// Return the privacy name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => PRIVACY_PRIVATE,
            Self::Public => PRIVACY_PUBLIC,
        }
    }

    /// Parse a privacy string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            PRIVACY_PRIVATE => Some(Self::Private),
            PRIVACY_PUBLIC => Some(Self::Public),
            _ => None,
        }
    }
}

impl std::fmt::Display for Privacy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that a privacy string is one of the accepted values.
pub fn validate_privacy(privacy: &str) -> Result<Privacy, String> {
    Privacy::from_str(privacy).ok_or_else(|| {
        format!(
            "Invalid privacy '{privacy}'. Must be one of: {}",
            VALID_PRIVACIES.join(", ")
        )
    })
}

/// Validate a list title: non-empty after trimming and at most
/// [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("List title must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(format!(
            "List title must be at most {MAX_TITLE_LEN} characters"
        ));
    }
    Ok(())
}

/// Fields an owner may change on an existing list.
///
/// Absent fields, an empty title, and an unknown privacy are ignored rather
/// than rejected, so a partial form never clears data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub privacy: Option<Privacy>,
}

impl ListChanges {
    /// Build the effective change set from raw (possibly partial) input.
    pub fn from_input(
        title: Option<&str>,
        description: Option<&str>,
        privacy: Option<&str>,
    ) -> Self {
        Self {
            title: title
                .map(str::trim)
                .filter(|t| validate_title(t).is_ok())
                .map(str::to_string),
            description: description
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            privacy: privacy.and_then(Privacy::from_str),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.privacy.is_none()
    }
}
