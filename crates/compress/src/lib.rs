#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` provides the byte transports that sit underneath zbuf's buffered
//! streams. A transport is the component that actually moves bytes to or from
//! a file, descriptor, or standard stream, optionally passing them through a
//! gzip, bzip2, or Zstandard codec on the way.
//!
//! # Design
//!
//! Transports are split by direction. [`ReadTransport`] exposes a single
//! bulk-fill operation and [`WriteTransport`] exposes write, flush, and a
//! consuming close that finalises the compressed frame. Callers obtain boxed
//! transports from [`open_reader`]/[`open_writer`] (paths), the descriptor
//! variants on unix, or [`reader_for`]/[`writer_for`] for any
//! [`std::io::Read`]/[`std::io::Write`] endpoint.
//!
//! The [`detect`] module resolves a [`CompressionAlgorithm`] from a path when
//! the caller does not name one.
//!
//! # Invariants
//!
//! - [`ReadTransport::read`] fills the supplied buffer completely unless the
//!   source is exhausted. A short count is the end-of-source signal.
//! - [`WriteTransport::write`] accepts every byte or fails.
//! - Closing consumes the transport, so each transport is closed at most once.
//!
//! # Errors
//!
//! Transfer operations return [`std::io::Result`]. Opening returns
//! [`OpenError`], which distinguishes codecs compiled out of the build from
//! I/O failures on a specific path.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use compress::gzip::GzipWriter;
//! use compress::{CompressionAlgorithm, CompressionLevel, ReadTransport, WriteTransport, reader_for};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sink = GzipWriter::new(Vec::new(), CompressionLevel::Default);
//! sink.write(b"payload")?;
//! let (compressed, _compressed_len) = sink.finish_into_inner()?;
//!
//! let mut source = reader_for(Cursor::new(compressed), CompressionAlgorithm::Gzip)?;
//! let mut buf = [0u8; 32];
//! let filled = source.read(&mut buf)?;
//! assert_eq!(&buf[..filled], b"payload");
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
mod common;
pub mod detect;
mod error;
pub mod gzip;
pub mod level;
mod open;
pub mod plain;
pub mod transport;

#[cfg(feature = "bzip2")]
pub mod bzip2;
#[cfg(feature = "zstd")]
pub mod zstd;

pub use algorithm::{CompressionAlgorithm, CompressionAlgorithmParseError};
pub use common::fill_from;
pub use error::OpenError;
pub use level::{CompressionLevel, CompressionLevelError};
#[cfg(unix)]
pub use open::{open_fd_reader, open_fd_writer};
pub use open::{STDIO_MARKER, is_stdio_path, open_reader, open_writer, reader_for, writer_for};
pub use transport::{ReadTransport, WriteTransport};
