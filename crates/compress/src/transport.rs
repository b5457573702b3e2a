//! Direction-specific transport capabilities.
//!
//! A buffered stream owns exactly one boxed transport for its whole life and
//! hands it back through `close`, which consumes the box. Neither trait offers
//! seeking.

use std::io;

use crate::algorithm::CompressionAlgorithm;

/// Source of (possibly decompressed) bytes.
pub trait ReadTransport: Send {
    /// Fills `buf` with as many bytes as the source can provide.
    ///
    /// Returns the number of bytes stored. Returning fewer than `buf.len()`
    /// bytes signals that the source is exhausted; callers must not expect
    /// further data after a short fill.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Releases the underlying endpoint.
    fn close(self: Box<Self>) -> io::Result<()>;

    /// Algorithm used to decode the source.
    fn algorithm(&self) -> CompressionAlgorithm;
}

/// Sink for (possibly compressed) bytes.
pub trait WriteTransport: Send {
    /// Encodes and writes every byte of `buf`.
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Pushes codec-internal buffering through to the endpoint.
    ///
    /// For compressing codecs this emits a sync point, not a frame trailer.
    fn flush(&mut self) -> io::Result<()>;

    /// Finalises the encoded frame, flushes the endpoint, and releases it.
    fn close(self: Box<Self>) -> io::Result<()>;

    /// Algorithm used to encode the sink.
    fn algorithm(&self) -> CompressionAlgorithm;
}
