use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Creation or update instant of a record.
///
/// New timestamps are RFC 3339 UTC strings with millisecond precision. The
/// inner string is kept verbatim, so values written by older front ends (for
/// example localized display strings) survive a rename untouched.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Timestamp for the current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Wrap an existing string without interpreting it.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// A current timestamp guaranteed to sort strictly after `previous`.
    ///
    /// If `previous` is not a parseable RFC 3339 value there is nothing to
    /// compare against and the plain current time is returned.
    pub fn after(previous: &Timestamp) -> Self {
        let now = Utc::now();
        match previous.to_datetime() {
            Some(prev) if now.timestamp_millis() <= prev.timestamp_millis() => {
                Self::from_datetime(prev + TimeDelta::milliseconds(1))
            }
            _ => Self::from_datetime(now),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse as RFC 3339. Returns `None` for legacy or empty values.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    /// Milliseconds since the UNIX epoch, when parseable.
    pub fn unix_millis(&self) -> Option<i64> {
        self.to_datetime().map(|at| at.timestamp_millis())
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
