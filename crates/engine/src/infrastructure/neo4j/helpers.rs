//! Neo4j deserialization helpers for node-to-entity conversion.
//!
//! Nodes coming back from a query and property maps built before a write
//! expose the same key/value view through [`PropertySource`], so the mapper
//! reads both the same way.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use issuetrack_domain::common::parse_datetime;
use neo4rs::{BoltMap, BoltString, BoltType, Node};

/// Read access to a flat property map.
pub trait PropertySource {
    /// The property as a string, or `None` when absent, null or not a string.
    fn get_optional_string(&self, key: &str) -> Option<String>;

    /// Get a string property with a default value if missing.
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_optional_string(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// The property as a native graph temporal, or `None` when it is not one.
    fn get_optional_temporal(&self, key: &str) -> Option<DateTime<FixedOffset>>;

    /// Read a timestamp stored either as an RFC3339 string or as a native
    /// temporal. Unparseable strings are logged and treated as absent.
    fn get_optional_datetime(&self, key: &str) -> Option<DateTime<FixedOffset>> {
        let Some(raw) = self.get_optional_string(key) else {
            return self.get_optional_temporal(key);
        };
        match parse_datetime(&raw) {
            Ok(dt) => Some(dt),
            Err(e) => {
                tracing::warn!(property = key, error = %e, "Ignoring unparseable timestamp");
                None
            }
        }
    }
}

/// Zoned values keep their offset; local ones (no zone on the wire) read as UTC.
fn temporal_from(
    zoned: Option<DateTime<FixedOffset>>,
    local: impl FnOnce() -> Option<NaiveDateTime>,
) -> Option<DateTime<FixedOffset>> {
    zoned.or_else(|| local().map(|naive| naive.and_utc().fixed_offset()))
}

impl PropertySource for Node {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get::<String>(key).ok()
    }

    fn get_optional_temporal(&self, key: &str) -> Option<DateTime<FixedOffset>> {
        temporal_from(self.get::<DateTime<FixedOffset>>(key).ok(), || {
            self.get::<NaiveDateTime>(key).ok()
        })
    }
}

impl PropertySource for BoltMap {
    fn get_optional_string(&self, key: &str) -> Option<String> {
        self.get::<String>(key).ok()
    }

    fn get_optional_temporal(&self, key: &str) -> Option<DateTime<FixedOffset>> {
        temporal_from(self.get::<DateTime<FixedOffset>>(key).ok(), || {
            self.get::<NaiveDateTime>(key).ok()
        })
    }
}

/// Extension for building sparse property maps.
pub trait BoltMapExt {
    fn put_str(&mut self, key: &str, value: impl Into<String>);

    /// Insert only when a value is present; absent keys are left out of the map.
    fn put_opt(&mut self, key: &str, value: Option<String>) {
        if let Some(value) = value {
            self.put_str(key, value);
        }
    }
}

impl BoltMapExt for BoltMap {
    fn put_str(&mut self, key: &str, value: impl Into<String>) {
        self.put(BoltString::from(key), BoltType::from(value.into()));
    }
}
