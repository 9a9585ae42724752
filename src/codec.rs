//! The timestamp codec: decides between numeric and textual JSON shapes.

use crate::config::{Config, Precision};
use crate::decompose::Decompose;
use crate::pattern::Pattern;
use chrono::format::ParseResult;
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// An immutable serialization codec for one timestamp type.
///
/// A codec carries a tri-state numeric flag, an optional formatting pattern,
/// and the type's [`Decompose`] record. When the flag is unset the decision
/// falls back to [`Config::timestamps`]; when no pattern is set the textual
/// shape is RFC 3339. Codecs are never modified in place: [`with_format`]
/// always returns a fresh value, so a codec can be shared freely across
/// threads.
///
/// [`with_format`]: TimeCodec::with_format
#[derive(Debug, Clone)]
pub struct TimeCodec<Tz: TimeZone> {
    decompose: Decompose<Tz>,
    timestamps: Option<bool>,
    pattern: Option<Pattern>,
}

impl<Tz: TimeZone> TimeCodec<Tz> {
    /// Creates the default codec for a type: numeric-vs-string deferred to
    /// the ambient settings, RFC 3339 as the textual form.
    pub fn new(decompose: Decompose<Tz>) -> Self {
        Self {
            decompose,
            timestamps: None,
            pattern: None,
        }
    }

    /// Returns a copy with the given overrides applied. `None` keeps the
    /// receiver's value for that field; the receiver itself is unchanged.
    pub fn with_format(&self, timestamps: Option<bool>, pattern: Option<Pattern>) -> Self {
        Self {
            decompose: self.decompose,
            timestamps: timestamps.or(self.timestamps),
            pattern: pattern.or_else(|| self.pattern.clone()),
        }
    }

    /// The codec's own numeric flag; `None` defers to the ambient settings.
    pub fn timestamps(&self) -> Option<bool> {
        self.timestamps
    }

    /// The explicit formatting pattern, if any.
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// The decomposition record this codec extracts epoch numbers with.
    pub fn decompose(&self) -> &Decompose<Tz> {
        &self.decompose
    }

    /// Reports whether this codec writes numbers under the given settings.
    pub fn writes_timestamps(&self, config: &Config) -> bool {
        self.timestamps.unwrap_or(config.timestamps)
    }

    /// Parses the textual shape: the explicit pattern when one is set,
    /// RFC 3339 otherwise. Zone-less patterns are read as UTC; date-only
    /// patterns complete to midnight UTC, so anything [`render`] produces
    /// parses back.
    ///
    /// [`render`]: TimeCodec::render
    pub fn parse_text(&self, s: &str) -> ParseResult<DateTime<FixedOffset>> {
        match &self.pattern {
            Some(p) => DateTime::parse_from_str(s, p.as_str())
                .or_else(|_| {
                    NaiveDateTime::parse_from_str(s, p.as_str())
                        .map(|n| n.and_utc().fixed_offset())
                })
                .or_else(|_| {
                    NaiveDate::parse_from_str(s, p.as_str())
                        .map(|d| d.and_time(NaiveTime::MIN).and_utc().fixed_offset())
                }),
            None => DateTime::parse_from_rfc3339(s),
        }
    }
}

impl<Tz: TimeZone> TimeCodec<Tz>
where
    Tz::Offset: fmt::Display,
{
    /// Formats the value's textual shape.
    pub fn render(&self, value: &DateTime<Tz>) -> String {
        match &self.pattern {
            Some(p) => value.format(p.as_str()).to_string(),
            None => value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    /// Writes one value under this codec and the given settings: an epoch
    /// number (unit per [`Config::precision`]) in numeric mode, the textual
    /// shape otherwise.
    pub fn serialize<S: Serializer>(
        &self,
        value: &DateTime<Tz>,
        config: &Config,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if self.writes_timestamps(config) {
            match config.precision {
                Precision::Millis => serializer.serialize_i64(self.decompose.epoch_millis(value)),
                Precision::Seconds => serializer.serialize_i64(self.decompose.epoch_secs(value)),
                Precision::Nanos => {
                    let secs = self.decompose.epoch_secs(value) as f64;
                    let frac = f64::from(self.decompose.subsec_nanos(value)) / 1e9;
                    serializer.serialize_f64(secs + frac)
                }
            }
        } else {
            serializer.serialize_str(&self.render(value))
        }
    }

    /// Reads one value under this codec and the given settings. Accepts an
    /// integer epoch number, a float of fractional epoch seconds, or the
    /// textual shape. The offset is zero for numeric input and whatever the
    /// text carried otherwise.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        &self,
        config: &Config,
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        deserializer.deserialize_any(StampVisitor {
            codec: self,
            precision: config.precision,
        })
    }
}

impl<Tz: TimeZone> Default for TimeCodec<Tz> {
    fn default() -> Self {
        Self::new(Decompose::standard())
    }
}

struct StampVisitor<'a, Tz: TimeZone> {
    codec: &'a TimeCodec<Tz>,
    precision: Precision,
}

impl<'de, Tz: TimeZone> Visitor<'de> for StampVisitor<'_, Tz> {
    type Value = DateTime<FixedOffset>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an epoch timestamp or a formatted datetime string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        let dt = match self.precision {
            Precision::Millis => Utc.timestamp_millis_opt(v).single(),
            Precision::Seconds | Precision::Nanos => Utc.timestamp_opt(v, 0).single(),
        };
        dt.map(|dt| dt.fixed_offset())
            .ok_or_else(|| E::custom(format!("epoch value out of range: {v}")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let v = i64::try_from(v)
            .map_err(|_| E::custom(format!("epoch value out of range: {v}")))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom("non-finite epoch value"));
        }
        let mut secs = v.floor();
        let mut nanos = ((v - secs) * 1e9).round() as u32;
        if nanos >= 1_000_000_000 {
            secs += 1.0;
            nanos = 0;
        }
        Utc.timestamp_opt(secs as i64, nanos)
            .single()
            .map(|dt| dt.fixed_offset())
            .ok_or_else(|| E::custom(format!("epoch value out of range: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        self.codec.parse_text(v).map_err(de::Error::custom)
    }
}
