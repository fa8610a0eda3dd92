use chrono::{DateTime, Utc};

/// Timestamp as shown in status tables and reports.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
