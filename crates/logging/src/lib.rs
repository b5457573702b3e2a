#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises how zbuf components report what they are doing.
//! Every stream lifecycle event is emitted through [`tracing`] under one of a
//! small set of stable targets (see [`targets`]), so operators can enable
//! exactly the diagnostics they need with a filter such as
//! `ZBUF_LOG=zbuf::fill=trace`.
//!
//! # Design
//!
//! - [`targets`] names the event categories.
//! - The `trace_*` macros wrap the standard tracing macros with the right
//!   target and level for each category.
//! - [`LogConfig`] maps a `-v` count onto a [`Verbosity`] and a filter
//!   directive.
//! - With the `tracing` feature, [`init_tracing`] installs a stderr fmt
//!   subscriber honouring the `ZBUF_LOG` environment variable.
//!
//! # Examples
//!
//! ```
//! use logging::{LogConfig, Verbosity};
//!
//! let config = LogConfig::from_verbose_level(2);
//! assert_eq!(config.verbosity, Verbosity::Debug);
//! assert_eq!(config.filter_directive(), "warn,zbuf=debug");
//! ```

mod config;
mod levels;
pub mod targets;
mod tracing_macros;

#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::LogConfig;
pub use levels::Verbosity;

#[cfg(feature = "tracing")]
pub use tracing_bridge::{LOG_ENV_VAR, init_tracing};
