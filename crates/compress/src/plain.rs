//! Uncompressed pass-through transports.

use std::io::{self, Read, Write};

use crate::algorithm::CompressionAlgorithm;
use crate::common::{CountingWriter, fill_from};
use crate::transport::{ReadTransport, WriteTransport};

/// Read transport that hands the endpoint's bytes through unchanged.
#[derive(Debug)]
pub struct PlainReader<R> {
    inner: R,
}

impl<R: Read> PlainReader<R> {
    /// Wraps `reader`.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self { inner: reader }
    }

    /// Consumes the transport and returns the wrapped reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> ReadTransport for PlainReader<R>
where
    R: Read + Send,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        fill_from(&mut self.inner, buf)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }

    fn algorithm(&self) -> CompressionAlgorithm {
        CompressionAlgorithm::Plain
    }
}

/// Write transport that forwards bytes to the endpoint unchanged.
#[derive(Debug)]
pub struct PlainWriter<W: Write> {
    inner: CountingWriter<W>,
}

impl<W: Write> PlainWriter<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            inner: CountingWriter::new(writer),
        }
    }

    /// Returns the number of bytes forwarded so far.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.inner.bytes()
    }

    /// Flushes the endpoint and returns it with the total byte count.
    pub fn finish_into_inner(mut self) -> io::Result<(W, u64)> {
        self.inner.flush()?;
        Ok(self.inner.into_parts())
    }
}

impl<W> WriteTransport for PlainWriter<W>
where
    W: Write + Send,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        let (_endpoint, bytes) = self.finish_into_inner()?;
        logging::trace_close!(algorithm = "plain", bytes, "closed plain writer");
        Ok(())
    }

    fn algorithm(&self) -> CompressionAlgorithm {
        CompressionAlgorithm::Plain
    }
}
