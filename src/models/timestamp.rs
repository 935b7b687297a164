//! Wire timestamp format shared by the record and checkpoint codecs
//!
//! Persisted files carry ISO-8601 timestamps with millisecond precision
//! and a UTC `Z` suffix (e.g. `2026-08-25T14:03:07.123Z`). Parsing accepts
//! any well-formed RFC 3339 timestamp and normalizes to UTC.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::StoreError;

/// Format a timestamp the way it is persisted.
pub fn encode(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a persisted timestamp, naming the offending field on failure.
pub fn decode(field: &str, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| StoreError::schema(field, "an ISO-8601 timestamp"))
}
