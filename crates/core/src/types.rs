/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Supabase auth user ids are UUIDs (the `sub` claim of the access token).
pub type UserId = uuid::Uuid;
