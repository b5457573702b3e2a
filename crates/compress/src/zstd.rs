#![allow(clippy::module_name_repetitions)]

//! Streaming Zstandard transports.
//!
//! The interface mirrors the gzip transports so higher layers can swap
//! algorithms without reworking their plumbing. Frames produced by the writer
//! are single-frame; the reader accepts concatenated frames.

use std::io::{self, BufReader, Read, Write};

use zstd::stream::{read::Decoder as ZstdDecoder, write::Encoder as ZstdEncoder};

use crate::algorithm::CompressionAlgorithm;
use crate::common::{CountingWriter, fill_from};
use crate::level::CompressionLevel;
use crate::transport::{ReadTransport, WriteTransport};

/// Read transport decoding Zstandard frames from the wrapped reader.
pub struct ZstdReader<R: Read> {
    inner: ZstdDecoder<'static, BufReader<R>>,
}

impl<R: Read> ZstdReader<R> {
    /// Creates a decoder over `reader`.
    pub fn new(reader: R) -> io::Result<Self> {
        let decoder = ZstdDecoder::new(reader)?;
        Ok(Self { inner: decoder })
    }
}

impl<R> ReadTransport for ZstdReader<R>
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
        CompressionAlgorithm::Zstd
    }
}

/// Write transport producing a single Zstandard frame.
pub struct ZstdWriter<W: Write> {
    inner: ZstdEncoder<'static, CountingWriter<W>>,
}

impl<W: Write> ZstdWriter<W> {
    /// Creates an encoder that writes compressed bytes into `writer`.
    pub fn new(writer: W, level: CompressionLevel) -> io::Result<Self> {
        let encoder = ZstdEncoder::new(CountingWriter::new(writer), zstd_level(level))?;
        Ok(Self { inner: encoder })
    }

    /// Returns the number of compressed bytes emitted so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.inner.get_ref().bytes()
    }

    /// Ends the frame and returns the endpoint with the compressed length.
    pub fn finish_into_inner(self) -> io::Result<(W, u64)> {
        let mut writer = self.inner.finish()?;
        writer.flush()?;
        Ok(writer.into_parts())
    }
}

impl<W> WriteTransport for ZstdWriter<W>
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
        logging::trace_close!(algorithm = "zstd", bytes, "closed zstd writer");
        Ok(())
    }

    fn algorithm(&self) -> CompressionAlgorithm {
        CompressionAlgorithm::Zstd
    }
}

/// Compresses `input` into a new [`Vec`].
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    zstd::stream::encode_all(input, zstd_level(level))
}

/// Decompresses `input` into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    zstd::stream::decode_all(input)
}

fn zstd_level(level: CompressionLevel) -> i32 {
    match level {
        CompressionLevel::Fast => 1,
        CompressionLevel::Default => 3,
        CompressionLevel::Best => 19,
        CompressionLevel::Precise(value) => i32::from(value.get()),
    }
}
