#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `stream` layers a fixed-capacity byte buffer over a
//! [`compress`] transport. Callers open a stream on a path or an owned
//! descriptor with a fixed direction and algorithm, then use bulk reads and
//! writes, single-byte reads with one byte of pushback, and delimiter scans
//! without caring whether the bytes are compressed.
//!
//! # Design
//!
//! Direction is a type: [`ReadStream`] only reads and [`WriteStream`] only
//! writes. The fopen-style [`open`] entry point returns a [`Stream`] holding
//! one of the two. Each stream owns its transport exclusively and releases it
//! exactly once, on [`ReadStream::close`]/[`WriteStream::close`] or on drop.
//!
//! Read streams refill the whole buffer in one transport call. A refill that
//! comes back short marks the source exhausted and no refill is attempted
//! afterwards. Write streams drain the buffer the moment it fills.
//!
//! # Invariants
//!
//! - The buffer cursor never passes the valid length, which never passes the
//!   capacity.
//! - Pushback is only available directly after a successful
//!   [`ReadStream::get_char`].
//! - [`ReadStream::resize`] and [`WriteStream::resize`] only succeed before
//!   any data has passed through the buffer.
//! - Bytes lost in a failed drain are discarded, not retried.
//!
//! # Errors
//!
//! Every fallible operation returns [`StreamError`]. End of source is not an
//! error: reads return `0` and [`ReadStream::get_char`] returns `None`.
//!
//! # Examples
//!
//! ```
//! use stream::{StreamOptions, open_with};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("records.zst");
//! let options = StreamOptions::new().with_capacity(16);
//!
//! let mut writer = open_with(&path, "w", None, &options)?.into_writer().unwrap();
//! for record in ["alpha", "beta", "gamma"] {
//!     writer.write(record.as_bytes())?;
//!     writer.write(b"\n")?;
//! }
//! writer.close()?;
//!
//! let mut reader = open_with(&path, "r", None, &options)?.into_reader().unwrap();
//! let mut line = Vec::new();
//! let mut records = Vec::new();
//! while reader.read_line(&mut line)? > 0 {
//!     records.push(String::from_utf8(line.clone())?);
//! }
//! assert_eq!(records, ["alpha\n", "beta\n", "gamma\n"]);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use compress::CompressionAlgorithm;

mod buffer;
mod error;
mod mode;
mod open;
mod options;
mod reader;
mod until;
mod writer;

#[cfg(test)]
mod test_support;

pub use compress::CompressionLevel;
pub use error::StreamError;
pub use mode::Direction;
#[cfg(unix)]
pub use open::open_fd;
pub use open::{Stream, open, open_with};
pub use options::{DEFAULT_CAPACITY, StreamOptions};
pub use reader::ReadStream;
pub use writer::WriteStream;

/// Uses `requested` when given, otherwise detects the algorithm from `path`.
fn resolve_algorithm(
    path: &Path,
    requested: Option<CompressionAlgorithm>,
) -> Result<CompressionAlgorithm, StreamError> {
    requested
        .or_else(|| compress::detect::detect_algorithm(path))
        .ok_or_else(|| StreamError::UnresolvedAlgorithm(path.to_path_buf()))
}
