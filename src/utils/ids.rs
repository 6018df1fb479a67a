use mongodb::bson::oid::ObjectId;

use super::error::AppError;

/// Parses a path identifier; a malformed id resolves to the same error as a missing one.
pub fn parse_object_id(raw: &str, not_found: AppError) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| not_found)
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Unix millis → RFC 3339 (UTC)
pub fn millis_to_rfc3339(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339()
}
