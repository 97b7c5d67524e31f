/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Editor id recorded for anonymous (unregistered) edits.
pub const ANONYMOUS_EDITOR_ID: DbId = 0;
