//! Epoch decomposition bindings for a timestamp type.

use chrono::{DateTime, TimeZone};
use std::fmt;

/// The three accessors a codec uses to turn a timestamp into epoch numbers:
/// whole milliseconds, whole seconds, and the nanosecond-of-second remainder.
///
/// Bindings are fixed at construction. Codecs derived from one another share
/// the same record, so every copy decomposes values identically.
pub struct Decompose<Tz: TimeZone> {
    millis: fn(&DateTime<Tz>) -> i64,
    secs: fn(&DateTime<Tz>) -> i64,
    nanos: fn(&DateTime<Tz>) -> u32,
}

impl<Tz: TimeZone> Decompose<Tz> {
    /// Creates a record from explicit accessor functions.
    pub fn new(
        millis: fn(&DateTime<Tz>) -> i64,
        secs: fn(&DateTime<Tz>) -> i64,
        nanos: fn(&DateTime<Tz>) -> u32,
    ) -> Self {
        Self { millis, secs, nanos }
    }

    /// The native decomposition for any chrono timestamp.
    pub fn standard() -> Self {
        Self {
            millis: |dt| dt.timestamp_millis(),
            secs: |dt| dt.timestamp(),
            nanos: |dt| dt.timestamp_subsec_nanos(),
        }
    }

    /// Returns the value's whole milliseconds since the Unix epoch.
    pub fn epoch_millis(&self, value: &DateTime<Tz>) -> i64 {
        (self.millis)(value)
    }

    /// Returns the value's whole seconds since the Unix epoch.
    pub fn epoch_secs(&self, value: &DateTime<Tz>) -> i64 {
        (self.secs)(value)
    }

    /// Returns the value's nanoseconds past the last whole second.
    pub fn subsec_nanos(&self, value: &DateTime<Tz>) -> u32 {
        (self.nanos)(value)
    }
}

// Fields are fn pointers, so the record is Copy regardless of Tz.
impl<Tz: TimeZone> Clone for Decompose<Tz> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tz: TimeZone> Copy for Decompose<Tz> {}

impl<Tz: TimeZone> fmt::Debug for Decompose<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decompose").finish_non_exhaustive()
    }
}

impl<Tz: TimeZone> Default for Decompose<Tz> {
    fn default() -> Self {
        Self::standard()
    }
}
