//! Configurable JSON time serialization.
//!
//! This crate provides time types whose JSON shape is decided by an ambient
//! [`Config`]: numeric epoch timestamps (the default) or formatted strings.
//!
//! - [`Instant`]: a UTC instant
//! - [`OffsetTime`]: an instant with a fixed UTC offset
//! - [`ZonedTime`]: an instant in the system's local zone
//! - [`Duration`]: a duration following the same numeric-vs-string switch
//!
//! Each type owns a shared default [`TimeCodec`]; per-field variations are
//! derived from it with [`TimeCodec::with_format`], which never touches the
//! original.
//!
//! # Example
//!
//! ```rust
//! use timeshape::{Instant, Pattern};
//!
//! // Built-in defaults: numeric epoch milliseconds.
//! let t = Instant::from_millis(1705314600000);
//! let json = serde_json::to_string(&t).unwrap();
//! assert_eq!(json, "1705314600000");
//!
//! // A derived codec renders strings; the shared default is unchanged.
//! let text = Instant::codec().with_format(Some(false), None);
//! assert_eq!(text.render(&t.datetime()), "2024-01-15T10:30:00Z");
//!
//! let dated = text.with_format(None, Some(Pattern::new("%Y/%m/%d").unwrap()));
//! assert_eq!(dated.render(&t.datetime()), "2024/01/15");
//! assert!(Instant::codec().pattern().is_none());
//! ```

mod codec;
mod config;
mod decompose;
mod duration;
mod instant;
mod offset;
mod pattern;
mod zoned;

pub use codec::TimeCodec;
pub use config::{AlreadyInstalled, Config, Precision};
pub use decompose::Decompose;
pub use duration::Duration;
pub use instant::Instant;
pub use offset::OffsetTime;
pub use pattern::{Pattern, PatternError};
pub use zoned::ZonedTime;

#[cfg(test)]
mod tests;
