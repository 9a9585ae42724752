//! Duration type following the same numeric-vs-string switch as timestamps.

use crate::config::{Config, Precision};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration as StdDuration;

/// A duration whose JSON shape follows the ambient [`Config`]: a number in
/// the configured unit when timestamps are on, a compact string such as
/// `"1h30m45s"` otherwise. Deserializes from either shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(StdDuration);

impl Duration {
    /// Creates a new Duration from a std::time::Duration.
    pub fn new(d: StdDuration) -> Self {
        Self(d)
    }

    /// Creates a Duration from seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(StdDuration::from_secs(secs))
    }

    /// Creates a Duration from milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self(StdDuration::from_millis(ms))
    }

    /// Returns the underlying std::time::Duration.
    pub fn as_std(&self) -> StdDuration {
        self.0
    }

    /// Returns the duration as whole seconds.
    pub fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }

    /// Returns the duration as seconds (floating point).
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Returns the duration as milliseconds.
    pub fn as_millis(&self) -> u128 {
        self.0.as_millis()
    }

    /// Returns true if this duration is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.as_secs();
        let (hours, mins, secs) = (total / 3600, (total % 3600) / 60, total % 60);

        if hours > 0 {
            write!(f, "{hours}h{mins}m{secs}s")
        } else if mins > 0 {
            write!(f, "{mins}m{secs}s")
        } else {
            write!(f, "{secs}s")
        }
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let config = Config::global();
        if config.timestamps {
            match config.precision {
                Precision::Millis => serializer
                    .serialize_u64(u64::try_from(self.0.as_millis()).unwrap_or(u64::MAX)),
                Precision::Seconds => serializer.serialize_u64(self.0.as_secs()),
                Precision::Nanos => serializer.serialize_f64(self.0.as_secs_f64()),
            }
        } else {
            serializer.serialize_str(&self.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DurationVisitor;

        impl serde::de::Visitor<'_> for DurationVisitor {
            type Value = Duration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a duration string (e.g., '1h30m') or a number")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                parse_compact(v).map_err(serde::de::Error::custom)
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                if v < 0 {
                    return Err(serde::de::Error::custom("negative duration"));
                }
                self.visit_u64(v as u64)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(match Config::global().precision {
                    Precision::Millis => Duration::from_millis(v),
                    Precision::Seconds | Precision::Nanos => Duration::from_secs(v),
                })
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if !v.is_finite() || v < 0.0 {
                    return Err(serde::de::Error::custom("invalid duration seconds"));
                }
                Ok(Duration(StdDuration::from_secs_f64(v)))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Duration::default())
            }
        }

        deserializer.deserialize_any(DurationVisitor)
    }
}

/// Parses a compact duration string like "1h30m", "5m", "30s"; a trailing
/// bare number counts as seconds.
fn parse_compact(s: &str) -> Result<Duration, String> {
    if s.is_empty() {
        return Ok(Duration::default());
    }

    let mut total: u64 = 0;
    let mut digits = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let n: u64 = digits
            .parse()
            .map_err(|_| format!("invalid number in duration: {s}"))?;
        digits.clear();
        total += match c {
            'h' => n * 3600,
            'm' => n * 60,
            's' => n,
            _ => return Err(format!("invalid duration unit {c:?} in: {s}")),
        };
    }
    if !digits.is_empty() {
        total += digits
            .parse::<u64>()
            .map_err(|_| format!("invalid number in duration: {s}"))?;
    }

    Ok(Duration::from_secs(total))
}

impl From<StdDuration> for Duration {
    fn from(d: StdDuration) -> Self {
        Self(d)
    }
}

impl From<Duration> for StdDuration {
    fn from(d: Duration) -> Self {
        d.0
    }
}
