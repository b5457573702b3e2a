//! crates/logging/src/tracing_macros.rs
//! Convenience macros for zbuf-specific tracing.
//!
//! These macros provide ergonomic wrappers around standard tracing macros
//! with appropriate targets for zbuf subsystems. Callers must depend on
//! `tracing` directly.

/// Emit a stream/transport open trace.
///
/// # Example
/// ```ignore
/// trace_open!(path = %path.display(), "opened read stream");
/// ```
#[macro_export]
macro_rules! trace_open {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::targets::OPEN, $($arg)*);
    };
}

/// Emit a buffer refill trace.
///
/// # Example
/// ```ignore
/// trace_fill!(filled, capacity, "refilled buffer");
/// ```
#[macro_export]
macro_rules! trace_fill {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: $crate::targets::FILL, $($arg)*);
    };
}

/// Emit a buffer drain trace.
///
/// # Example
/// ```ignore
/// trace_drain!(len, "drained buffer");
/// ```
#[macro_export]
macro_rules! trace_drain {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: $crate::targets::DRAIN, $($arg)*);
    };
}

/// Emit a pushback trace.
///
/// # Example
/// ```ignore
/// trace_pushback!(byte, "pushed back byte");
/// ```
#[macro_export]
macro_rules! trace_pushback {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: $crate::targets::PUSHBACK, $($arg)*);
    };
}

/// Emit a stream/transport close trace.
///
/// # Example
/// ```ignore
/// trace_close!(bytes, "closed writer");
/// ```
#[macro_export]
macro_rules! trace_close {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: $crate::targets::CLOSE, $($arg)*);
    };
}

/// Emit a CLI command progress trace.
///
/// # Example
/// ```ignore
/// trace_command!(command = "convert", bytes, "conversion complete");
/// ```
#[macro_export]
macro_rules! trace_command {
    ($($arg:tt)*) => {
        ::tracing::info!(target: $crate::targets::COMMAND, $($arg)*);
    };
}
