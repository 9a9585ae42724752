//! Validated strftime formatting patterns.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write as _};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a pattern contains a specifier chrono cannot format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized specifier in pattern: {0:?}")]
pub struct PatternError(pub String);

/// A strftime-style formatting pattern, checked at construction so that
/// formatting with it can never fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(String);

impl Pattern {
    /// Validates and stores a pattern, e.g. `"%Y-%m-%d %H:%M:%S"`.
    pub fn new(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let pattern = pattern.into();
        let items: Vec<Item> = StrftimeItems::new(&pattern).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(PatternError(pattern));
        }
        // Some specifiers parse but refuse to format (e.g. %#z); trial-format
        // an epoch value to catch those.
        let probe = DateTime::<Utc>::default();
        let mut buf = String::new();
        if write!(buf, "{}", probe.format_with_items(items.iter())).is_err() {
            return Err(PatternError(pattern));
        }
        Ok(Self(pattern))
    }

    /// Returns the pattern text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
