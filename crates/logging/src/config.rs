//! crates/logging/src/config.rs
//! Logging configuration derived from command-line flags.

use super::levels::Verbosity;

/// Logging configuration for a zbuf process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogConfig {
    /// Level applied to zbuf's own targets.
    pub verbosity: Verbosity,
    /// Whether to colourise output.
    pub ansi: bool,
}

impl LogConfig {
    /// Create a configuration from a `-v` count.
    pub const fn from_verbose_level(level: u8) -> Self {
        Self {
            verbosity: Verbosity::from_count(level),
            ansi: false,
        }
    }

    /// Enable or disable ANSI colours.
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Filter directive applied when `ZBUF_LOG` is not set.
    ///
    /// Third-party crates stay at `warn`; zbuf targets follow the verbosity.
    pub fn filter_directive(&self) -> String {
        match self.verbosity {
            Verbosity::Quiet => "warn".to_owned(),
            level => format!("warn,zbuf={level}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_config_only_warns() {
        let config = LogConfig::default();
        assert_eq!(config.filter_directive(), "warn");
        assert!(!config.ansi);
    }

    #[test]
    fn verbose_levels_raise_zbuf_targets() {
        assert_eq!(LogConfig::from_verbose_level(1).filter_directive(), "warn,zbuf=info");
        assert_eq!(LogConfig::from_verbose_level(3).filter_directive(), "warn,zbuf=trace");
    }

    #[test]
    fn ansi_is_opt_in() {
        assert!(LogConfig::from_verbose_level(0).with_ansi(true).ansi);
    }
}
