//! Process-wide serialization settings.

use once_cell::sync::OnceCell;
use thiserror::Error;

static GLOBAL: OnceCell<Config> = OnceCell::new();

/// The unit used for numeric timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    /// Whole milliseconds since the Unix epoch.
    #[default]
    Millis,
    /// Whole seconds since the Unix epoch.
    Seconds,
    /// Fractional seconds since the Unix epoch, written as a float.
    /// Integers read back under this precision are whole seconds.
    Nanos,
}

/// Error returned when global settings are installed twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("global timeshape settings already installed")]
pub struct AlreadyInstalled;

/// Settings that apply to every codec whose own fields leave the decision
/// open: whether values serialize as numbers at all, and at what unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Serialize as numeric epoch timestamps rather than strings.
    pub timestamps: bool,
    /// Unit for numeric timestamps.
    pub precision: Precision,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timestamps: true,
            precision: Precision::Millis,
        }
    }
}

impl Config {
    /// Installs these settings as the process-wide default. May be called at
    /// most once, before any serialization; the installed value lives for the
    /// rest of the process and is safe to read from any thread.
    pub fn install(self) -> Result<(), AlreadyInstalled> {
        GLOBAL.set(self).map_err(|_| AlreadyInstalled)
    }

    /// Returns the installed settings, or the built-in defaults when none
    /// were installed.
    pub fn global() -> Config {
        GLOBAL.get().copied().unwrap_or_default()
    }
}
