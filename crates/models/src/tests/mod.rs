
/// Schema tests against an in-memory SQLite database with migrations applied
pub mod schema_tests;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

pub(crate) fn ts(secs: i64) -> DateTime<FixedOffset> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default().fixed_offset()
}
