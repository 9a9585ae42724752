//! Fixed-offset timestamp type.

use crate::codec::TimeCodec;
use crate::config::Config;
use crate::decompose::Decompose;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static CODEC: Lazy<TimeCodec<FixedOffset>> =
    Lazy::new(|| TimeCodec::new(Decompose::standard()));

/// An instant carrying a fixed UTC offset. Serializes like [`Instant`] under
/// the ambient [`Config`]; the textual shape keeps the offset, and parsing a
/// string restores whatever offset the text carried.
///
/// [`Instant`]: crate::Instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetTime(DateTime<FixedOffset>);

impl OffsetTime {
    /// Creates a new OffsetTime from a DateTime<FixedOffset>.
    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// Returns the current time at offset zero.
    pub fn now() -> Self {
        Self(Utc::now().fixed_offset())
    }

    /// Creates an OffsetTime at offset zero from Unix milliseconds.
    pub fn from_millis(ms: i64) -> Self {
        Self(
            Utc.timestamp_millis_opt(ms)
                .single()
                .unwrap_or_default()
                .fixed_offset(),
        )
    }

    /// Returns the Unix milliseconds value.
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Returns the Unix seconds value.
    pub fn as_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the UTC offset.
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    /// Returns the underlying DateTime<FixedOffset>.
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// The shared default codec for this type.
    pub fn codec() -> &'static TimeCodec<FixedOffset> {
        &CODEC
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::codec().render(&self.0))
    }
}

impl Serialize for OffsetTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Self::codec().serialize(&self.0, &Config::global(), serializer)
    }
}

impl<'de> Deserialize<'de> for OffsetTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::codec()
            .deserialize(&Config::global(), deserializer)
            .map(Self)
    }
}

impl From<DateTime<FixedOffset>> for OffsetTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl From<OffsetTime> for DateTime<FixedOffset> {
    fn from(t: OffsetTime) -> Self {
        t.0
    }
}

impl From<DateTime<Utc>> for OffsetTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.fixed_offset())
    }
}
