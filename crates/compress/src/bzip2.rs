//! bzip2 transports.
//!
//! The interface mirrors the gzip transports. bzip2 has no real sync-flush,
//! so [`WriteTransport::flush`] only pushes completed blocks to the endpoint.

use std::io::{self, Read, Write};

use bzip2::{Compression, read::MultiBzDecoder, write::BzEncoder};

use crate::algorithm::CompressionAlgorithm;
use crate::common::{CountingWriter, fill_from};
use crate::level::CompressionLevel;
use crate::transport::{ReadTransport, WriteTransport};

/// Read transport decoding bzip2 streams, including concatenated ones.
pub struct Bzip2Reader<R: Read> {
    inner: MultiBzDecoder<R>,
}

impl<R: Read> Bzip2Reader<R> {
    /// Creates a decoder over `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            inner: MultiBzDecoder::new(reader),
        }
    }
}

impl<R> ReadTransport for Bzip2Reader<R>
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
        CompressionAlgorithm::Bzip2
    }
}

/// Write transport producing a single bzip2 stream.
pub struct Bzip2Writer<W: Write> {
    inner: BzEncoder<CountingWriter<W>>,
}

impl<W: Write> Bzip2Writer<W> {
    /// Creates an encoder that writes compressed bytes into `writer`.
    #[must_use]
    pub fn new(writer: W, level: CompressionLevel) -> Self {
        Self {
            inner: BzEncoder::new(CountingWriter::new(writer), bzip2_level(level)),
        }
    }

    /// Returns the number of compressed bytes emitted so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.inner.get_ref().bytes()
    }

    /// Writes the end-of-stream marker and returns the endpoint with the compressed length.
    pub fn finish_into_inner(self) -> io::Result<(W, u64)> {
        let mut writer = self.inner.finish()?;
        writer.flush()?;
        Ok(writer.into_parts())
    }
}

impl<W> WriteTransport for Bzip2Writer<W>
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
        logging::trace_close!(algorithm = "bzip2", bytes, "closed bzip2 writer");
        Ok(())
    }

    fn algorithm(&self) -> CompressionAlgorithm {
        CompressionAlgorithm::Bzip2
    }
}

/// Compresses `input` into a new bzip2 stream.
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = BzEncoder::new(Vec::new(), bzip2_level(level));
    encoder.write_all(input)?;
    encoder.finish()
}

/// Decompresses every bzip2 stream in `input` into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = MultiBzDecoder::new(input);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}

fn bzip2_level(level: CompressionLevel) -> Compression {
    Compression::new(level.numeric())
}
