//! Tracing targets used by stream and transport events.

/// Stream and transport opening.
pub const OPEN: &str = "zbuf::open";
/// Read-side buffer refills.
pub const FILL: &str = "zbuf::fill";
/// Write-side buffer drains.
pub const DRAIN: &str = "zbuf::drain";
/// Single-byte pushback.
pub const PUSHBACK: &str = "zbuf::pushback";
/// Stream and transport teardown.
pub const CLOSE: &str = "zbuf::close";
/// Command-level progress reported by the CLI.
pub const COMMAND: &str = "zbuf::command";

/// Every target, for building filters and listings.
pub const ALL: [&str; 6] = [OPEN, FILL, DRAIN, PUSHBACK, CLOSE, COMMAND];
