//! crates/logging/src/levels.rs
//! Verbosity levels selected by repeated `-v` flags.

use std::fmt;

/// How much of zbuf's own diagnostics to emit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verbosity {
    /// Warnings and errors only.
    #[default]
    Quiet,
    /// Open and close events.
    Info,
    /// Adds per-operation detail such as transport close statistics.
    Debug,
    /// Adds every fill and drain.
    Trace,
}

impl Verbosity {
    /// Maps a `-v` count onto a level, saturating at [`Verbosity::Trace`].
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Quiet,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the level name understood by tracing filter directives.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_saturate_at_trace() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Quiet);
        assert_eq!(Verbosity::from_count(1), Verbosity::Info);
        assert_eq!(Verbosity::from_count(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_count(3), Verbosity::Trace);
        assert_eq!(Verbosity::from_count(200), Verbosity::Trace);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Verbosity::Quiet < Verbosity::Info);
        assert!(Verbosity::Debug < Verbosity::Trace);
    }
}
