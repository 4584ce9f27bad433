/// All database primary keys are PostgreSQL BIGSERIAL. User ids are the
/// marketplace's numeric user ids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
