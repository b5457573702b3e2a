//! # Overview
//!
//! gzip transports built on [`flate2`]. The reader accepts multi-member files
//! (as produced by `cat a.gz b.gz`), matching the behaviour of `gzip -d`. The
//! writer tracks the number of compressed bytes it hands to the endpoint so
//! the close path can report the on-disk size.
//!
//! # Examples
//!
//! ```
//! use compress::CompressionLevel;
//! use compress::gzip::{compress_to_vec, decompress_to_vec};
//!
//! let data = b"highly compressible payload";
//! let compressed = compress_to_vec(data, CompressionLevel::Best).unwrap();
//! let decoded = decompress_to_vec(&compressed).unwrap();
//! assert_eq!(decoded, data);
//! ```

use std::io::{self, Read, Write};

use flate2::{Compression, read::MultiGzDecoder, write::GzEncoder};

use crate::algorithm::CompressionAlgorithm;
use crate::common::{CountingWriter, fill_from};
use crate::level::CompressionLevel;
use crate::transport::{ReadTransport, WriteTransport};

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::Fast => Self::fast(),
            CompressionLevel::Default => Self::default(),
            CompressionLevel::Best => Self::best(),
            CompressionLevel::Precise(value) => Self::new(u32::from(value.get())),
        }
    }
}

/// Read transport decoding gzip members from the wrapped reader.
pub struct GzipReader<R: Read> {
    inner: MultiGzDecoder<R>,
}

impl<R: Read> GzipReader<R> {
    /// Creates a decoder over `reader`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            inner: MultiGzDecoder::new(reader),
        }
    }

    /// Consumes the decoder and returns the wrapped reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R> ReadTransport for GzipReader<R>
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
        CompressionAlgorithm::Gzip
    }
}

/// Write transport producing a single gzip member.
pub struct GzipWriter<W: Write> {
    inner: GzEncoder<CountingWriter<W>>,
}

impl<W: Write> GzipWriter<W> {
    /// Creates an encoder that writes compressed bytes into `writer`.
    #[must_use]
    pub fn new(writer: W, level: CompressionLevel) -> Self {
        Self {
            inner: GzEncoder::new(CountingWriter::new(writer), level.into()),
        }
    }

    /// Returns the number of compressed bytes emitted so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.inner.get_ref().bytes()
    }

    /// Writes the gzip trailer and returns the endpoint with the compressed length.
    pub fn finish_into_inner(self) -> io::Result<(W, u64)> {
        let mut writer = self.inner.finish()?;
        writer.flush()?;
        Ok(writer.into_parts())
    }
}

impl<W> WriteTransport for GzipWriter<W>
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
        logging::trace_close!(algorithm = "gzip", bytes, "closed gzip writer");
        Ok(())
    }

    fn algorithm(&self) -> CompressionAlgorithm {
        CompressionAlgorithm::Gzip
    }
}

/// Compresses `input` into a new gzip member.
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), level.into());
    encoder.write_all(input)?;
    encoder.finish()
}

/// Decompresses every gzip member in `input` into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(input);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}
