#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Several independent inputs failed validation. Every failure is listed
    /// in `causes`; nothing was applied.
    #[error("{message}: {}", .causes.join("; "))]
    InvalidBatch {
        message: String,
        causes: Vec<String>,
    },

    /// A batch was applied in part. Writes that succeeded are kept; the
    /// failed ones are listed in `causes`.
    #[error("{message}: {}", .causes.join("; "))]
    PartialFailure {
        message: String,
        causes: Vec<String>,
    },
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// `true` for the "no data" signal that callers may treat as absence.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
