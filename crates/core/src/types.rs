/// All record ids are UUIDv7, generated at creation time.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-ordered record id.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
