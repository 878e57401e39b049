//! Points in time as the course front end writes them.
//!
//! Stored records carry times in three shapes: epoch milliseconds, ISO-8601
//! strings (`updatedAt`, achievement unlock times) and browser date strings
//! such as `"Mon Oct 19 2026"` (`lastStudyDate`). All three read into a
//! [`Timestamp`]; a timestamp always writes back as ISO-8601. Date strings
//! carry no time zone and are read as UTC midnight.

#[cfg(test)]
#[path = "timestamp_test.rs"]
mod timestamp_test;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognised timestamp `{0}` (expected epoch ms, ISO-8601, or e.g. \"Mon Oct 19 2026\")")]
pub struct TimestampError(String);

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Whole UTC days since the Unix epoch.
    #[must_use]
    pub const fn day(self) -> i64 {
        self.0.div_euclid(DAY_MS)
    }

    #[must_use]
    pub fn now() -> Self {
        Self(now_ms())
    }

    /// Parse any of the accepted shapes.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] when `raw` matches none of them.
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let raw = raw.trim();
        if let Ok(ms) = raw.parse::<i64>() {
            return Ok(Self(ms));
        }
        if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Self::from_datetime(at, raw);
        }
        let date_string = format_description!("[weekday repr:short] [month repr:short] [day] [year]");
        if let Ok(date) = Date::parse(raw, date_string) {
            return Self::from_datetime(date.midnight().assume_utc(), raw);
        }
        Err(TimestampError(raw.to_string()))
    }

    fn from_datetime(at: OffsetDateTime, raw: &str) -> Result<Self, TimestampError> {
        i64::try_from(at.unix_timestamp_nanos() / 1_000_000)
            .map(Self)
            .map_err(|_| TimestampError(raw.to_string()))
    }

    fn to_rfc3339(self) -> Option<String> {
        let Ok(at) = OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000) else {
            return None;
        };
        match at.format(&Rfc3339) {
            Ok(text) => Some(text),
            Err(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_rfc3339() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_i64(self.0),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Millis(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TimestampRepr::deserialize(deserializer)? {
            TimestampRepr::Millis(ms) => Ok(Self(ms)),
            TimestampRepr::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
