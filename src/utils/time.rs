use chrono::Utc;

/// Milliseconds since the unix epoch, as stamped into channel headers.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
