//! UTC instant type.

use crate::codec::TimeCodec;
use crate::config::Config;
use crate::decompose::Decompose;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static CODEC: Lazy<TimeCodec<Utc>> = Lazy::new(|| TimeCodec::new(Decompose::standard()));

/// A UTC instant whose JSON shape follows the ambient [`Config`]: an epoch
/// number by default, a formatted string when timestamps are switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// Creates a new Instant from a DateTime<Utc>.
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the current time as Instant.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates an Instant from Unix milliseconds.
    pub fn from_millis(ms: i64) -> Self {
        Self(Utc.timestamp_millis_opt(ms).single().unwrap_or_default())
    }

    /// Creates an Instant from Unix seconds.
    pub fn from_secs(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    /// Returns the Unix milliseconds value.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix seconds value.
    pub fn as_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the nanoseconds past the last whole second.
    pub fn subsec_nanos(&self) -> u32 {
        self.0.timestamp_subsec_nanos()
    }

    /// Returns the underlying DateTime<Utc>.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Reports whether this represents the zero time instant.
    pub fn is_zero(&self) -> bool {
        self.0.timestamp_millis() == 0
    }

    /// The shared default codec for this type. Always the same instance;
    /// derive customized codecs from it with
    /// [`with_format`](TimeCodec::with_format).
    pub fn codec() -> &'static TimeCodec<Utc> {
        &CODEC
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::codec().render(&self.0))
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Self::codec().serialize(&self.0, &Config::global(), serializer)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dt = Self::codec().deserialize(&Config::global(), deserializer)?;
        Ok(Self(dt.with_timezone(&Utc)))
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Instant> for DateTime<Utc> {
    fn from(t: Instant) -> Self {
        t.0
    }
}

impl From<i64> for Instant {
    fn from(ms: i64) -> Self {
        Self::from_millis(ms)
    }
}
