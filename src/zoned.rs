//! Local-zone timestamp type.

use crate::codec::TimeCodec;
use crate::config::Config;
use crate::decompose::Decompose;
use chrono::{DateTime, Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static CODEC: Lazy<TimeCodec<Local>> = Lazy::new(|| TimeCodec::new(Decompose::standard()));

/// An instant in the system's local zone. The numeric shape is identical to
/// [`Instant`] (epoch numbers carry no zone); the textual shape renders with
/// the local offset, and values read back are converted into the local zone.
///
/// [`Instant`]: crate::Instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZonedTime(DateTime<Local>);

impl ZonedTime {
    /// Creates a new ZonedTime from a DateTime<Local>.
    pub fn new(dt: DateTime<Local>) -> Self {
        Self(dt)
    }

    /// Returns the current local time.
    pub fn now() -> Self {
        Self(Local::now())
    }

    /// Creates a ZonedTime from Unix milliseconds.
    pub fn from_millis(ms: i64) -> Self {
        let utc = Utc.timestamp_millis_opt(ms).single().unwrap_or_default();
        Self(utc.with_timezone(&Local))
    }

    /// Returns the Unix milliseconds value.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix seconds value.
    pub fn as_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the underlying DateTime<Local>.
    pub fn datetime(&self) -> DateTime<Local> {
        self.0
    }

    /// The shared default codec for this type.
    pub fn codec() -> &'static TimeCodec<Local> {
        &CODEC
    }
}

impl fmt::Display for ZonedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::codec().render(&self.0))
    }
}

impl Serialize for ZonedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Self::codec().serialize(&self.0, &Config::global(), serializer)
    }
}

impl<'de> Deserialize<'de> for ZonedTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dt = Self::codec().deserialize(&Config::global(), deserializer)?;
        Ok(Self(dt.with_timezone(&Local)))
    }
}

impl From<DateTime<Local>> for ZonedTime {
    fn from(dt: DateTime<Local>) -> Self {
        Self(dt)
    }
}

impl From<ZonedTime> for DateTime<Local> {
    fn from(t: ZonedTime) -> Self {
        t.0
    }
}

impl From<DateTime<Utc>> for ZonedTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.with_timezone(&Local))
    }
}
