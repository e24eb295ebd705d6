//! Timestamp conversion for persisted properties.
//!
//! Issue timestamps carry their original offset, so everything here works in
//! `DateTime<FixedOffset>` and never normalizes to UTC.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::error::DomainError;

/// Parses an RFC3339 timestamp string, keeping its offset.
///
/// # Examples
///
/// ```
/// use issuetrack_domain::common::parse_datetime;
/// use chrono::Timelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00+05:00").unwrap();
/// assert_eq!(dt.hour(), 10);
/// ```
pub fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, DomainError> {
    DateTime::parse_from_rfc3339(s)
        .map_err(|e| DomainError::parse(format!("invalid timestamp '{}': {}", s, e)))
}

/// Formats a timestamp the way it is stored on graph nodes.
///
/// Sub-second precision is kept only when present so round trips are exact.
pub fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// The Unix epoch at UTC, used as the placeholder for a missing required timestamp.
pub fn epoch() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}
