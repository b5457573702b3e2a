//! Buffered write stream.

use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::fd::OwnedFd;

use compress::{CompressionAlgorithm, WriteTransport};

use crate::buffer::StreamBuffer;
use crate::error::StreamError;
use crate::options::StreamOptions;

/// Write-only stream that accumulates bytes and drains them in full buffers.
///
/// The buffer is handed to the transport as soon as it reaches capacity, so a
/// write never leaves a full buffer behind. Pending bytes are drained by
/// [`flush`](Self::flush), [`close`](Self::close), or drop.
///
/// # Examples
///
/// ```
/// use stream::{WriteStream, ReadStream};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("greeting.gz");
///
/// let mut writer = WriteStream::create(&path, None)?;
/// writer.write(b"hello, compressed world\n")?;
/// writer.close()?;
///
/// let mut reader = ReadStream::open(&path, None)?;
/// let mut line = Vec::new();
/// reader.read_line(&mut line)?;
/// assert_eq!(line, b"hello, compressed world\n");
/// # Ok(())
/// # }
/// ```
pub struct WriteStream {
    buffer: StreamBuffer,
    transport: Option<Box<dyn WriteTransport>>,
    algorithm: CompressionAlgorithm,
}

impl WriteStream {
    /// Creates (or truncates) `path` for writing with default options.
    ///
    /// When `algorithm` is `None` it is detected from the path.
    pub fn create(
        path: impl AsRef<Path>,
        algorithm: Option<CompressionAlgorithm>,
    ) -> Result<Self, StreamError> {
        Self::create_with(path, algorithm, &StreamOptions::default())
    }

    /// Creates (or truncates) `path` for writing with explicit options.
    pub fn create_with(
        path: impl AsRef<Path>,
        algorithm: Option<CompressionAlgorithm>,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let path = path.as_ref();
        let algorithm = crate::resolve_algorithm(path, algorithm)?;
        let buffer = StreamBuffer::with_capacity(options.capacity)?;
        let transport = compress::open_writer(path, algorithm, options.level)?;
        logging::trace_open!(
            path = %path.display(),
            %algorithm,
            level = ?options.level,
            capacity = options.capacity,
            "opened write stream"
        );
        Ok(Self::from_parts(buffer, transport))
    }

    /// Takes ownership of `fd` and writes to it through `algorithm`.
    #[cfg(unix)]
    pub fn open_fd(
        fd: OwnedFd,
        algorithm: CompressionAlgorithm,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let buffer = StreamBuffer::with_capacity(options.capacity)?;
        let transport = compress::open_fd_writer(fd, algorithm, options.level)?;
        logging::trace_open!(%algorithm, capacity = options.capacity, "opened write stream on descriptor");
        Ok(Self::from_parts(buffer, transport))
    }

    /// Wraps an already-open transport.
    pub fn from_transport(
        transport: Box<dyn WriteTransport>,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let buffer = StreamBuffer::with_capacity(options.capacity)?;
        Ok(Self::from_parts(buffer, transport))
    }

    fn from_parts(buffer: StreamBuffer, transport: Box<dyn WriteTransport>) -> Self {
        Self {
            buffer,
            algorithm: transport.algorithm(),
            transport: Some(transport),
        }
    }

    /// Algorithm the stream encodes with.
    #[must_use]
    pub const fn algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }

    /// Current buffer capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Number of buffered bytes not yet handed to the transport.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Buffers all of `src`, draining each time the buffer fills.
    ///
    /// Returns `src.len()` on success. When a drain fails the error is
    /// returned immediately; bytes accepted before the failure stay accepted
    /// and the bytes lost with the failed drain are not replayed.
    pub fn write(&mut self, src: &[u8]) -> Result<usize, StreamError> {
        let mut delivered = 0;
        self.buffer_all(src, &mut delivered)?;
        Ok(src.len())
    }

    /// Appends `src`, draining on every full buffer.
    ///
    /// `delivered` counts the bytes of `src` that reached the transport in a
    /// successful drain, so it stays accurate when an error is returned.
    fn buffer_all(&mut self, src: &[u8], delivered: &mut usize) -> Result<(), StreamError> {
        let mut remaining = src;
        while !remaining.is_empty() {
            let accepted = self.buffer.append(remaining);
            remaining = &remaining[accepted..];
            if self.buffer.is_full() {
                self.drain()?;
                *delivered += accepted;
            }
        }
        Ok(())
    }

    /// Drains pending bytes and flushes the transport's own buffering.
    ///
    /// Does nothing when no bytes are pending.
    pub fn flush(&mut self) -> Result<(), StreamError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.drain()?;
        self.transport
            .as_deref_mut()
            .ok_or_else(StreamError::released)?
            .flush()
            .map_err(StreamError::Transport)
    }

    /// Replaces the buffer with one of `capacity` bytes.
    ///
    /// Only allowed before the first byte is written.
    pub fn resize(&mut self, capacity: usize) -> Result<(), StreamError> {
        if capacity == 0 {
            return Err(StreamError::ZeroCapacity);
        }
        if !self.buffer.is_pristine() {
            return Err(StreamError::BufferInUse);
        }
        self.buffer.replace(capacity)
    }

    /// Drains pending bytes, then closes the transport.
    ///
    /// The transport is closed even when the final drain fails; the drain
    /// failure is reported in that case.
    pub fn close(mut self) -> Result<(), StreamError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), StreamError> {
        let Some(mut transport) = self.transport.take() else {
            return Ok(());
        };
        let drained = if self.buffer.is_empty() {
            Ok(())
        } else {
            drain_into(&mut self.buffer, transport.as_mut())
        };
        logging::trace_close!(algorithm = %self.algorithm, "closing write stream");
        let closed = transport.close().map_err(StreamError::Transport);
        drained.and(closed)
    }

    fn drain(&mut self) -> Result<(), StreamError> {
        let transport = self
            .transport
            .as_deref_mut()
            .ok_or_else(StreamError::released)?;
        drain_into(&mut self.buffer, transport)
    }
}

/// Hands the pending bytes to `transport` and empties the buffer either way.
fn drain_into(
    buffer: &mut StreamBuffer,
    transport: &mut dyn WriteTransport,
) -> Result<(), StreamError> {
    let len = buffer.len();
    let result = transport.write(buffer.pending());
    buffer.clear();
    match result {
        Ok(()) => {
            logging::trace_drain!(len, "drained buffer");
            Ok(())
        }
        Err(error) => {
            logging::trace_drain!(len, %error, "drain failed; buffered bytes discarded");
            Err(StreamError::Transport(error))
        }
    }
}

impl io::Write for WriteStream {
    /// Reports a short write instead of an error when part of `buf` already
    /// reached the transport before a drain failed.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut delivered = 0;
        match self.buffer_all(buf, &mut delivered) {
            Ok(()) => Ok(buf.len()),
            Err(_) if delivered > 0 => Ok(delivered),
            Err(error) => Err(error.into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Self::flush(self).map_err(io::Error::from)
    }
}

impl Drop for WriteStream {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            tracing::warn!(target: logging::targets::CLOSE, %error, "failed to close write stream");
        }
    }
}

impl std::fmt::Debug for WriteStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteStream")
            .field("algorithm", &self.algorithm)
            .field("buffer", &self.buffer)
            .field("open", &self.transport.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingWriter;

    fn stream(capacity: usize) -> (WriteStream, RecordingWriter) {
        let transport = RecordingWriter::new();
        let handle = transport.clone();
        let options = StreamOptions::new().with_capacity(capacity);
        let stream = WriteStream::from_transport(Box::new(transport), &options).unwrap();
        (stream, handle)
    }

    #[test]
    fn drains_exactly_when_buffer_fills() {
        let (mut stream, handle) = stream(4);
        assert_eq!(stream.write(&[1, 2, 3, 4, 5]).unwrap(), 5);
        assert_eq!(handle.writes(), vec![vec![1, 2, 3, 4]]);
        assert_eq!(stream.pending(), 1);
        stream.close().unwrap();
        assert_eq!(handle.writes(), vec![vec![1, 2, 3, 4], vec![5]]);
        assert_eq!(handle.closes(), 1);
    }

    #[test]
    fn exact_capacity_write_leaves_nothing_pending() {
        let (mut stream, handle) = stream(4);
        stream.write(&[9; 4]).unwrap();
        assert_eq!(stream.pending(), 0);
        stream.close().unwrap();
        assert_eq!(handle.writes(), vec![vec![9; 4]]);
    }

    #[test]
    fn large_write_spans_several_drains() {
        let (mut stream, handle) = stream(3);
        stream.write(b"abcdefgh").unwrap();
        assert_eq!(handle.writes(), vec![b"abc".to_vec(), b"def".to_vec()]);
        assert_eq!(stream.pending(), 2);
    }

    #[test]
    fn flush_without_pending_bytes_is_a_noop() {
        let (mut stream, handle) = stream(4);
        stream.flush().unwrap();
        assert!(handle.writes().is_empty());
        assert_eq!(handle.flushes(), 0);
    }

    #[test]
    fn flush_drains_and_flushes_transport() {
        let (mut stream, handle) = stream(8);
        stream.write(b"abc").unwrap();
        stream.flush().unwrap();
        assert_eq!(handle.writes(), vec![b"abc".to_vec()]);
        assert_eq!(handle.flushes(), 1);
        assert_eq!(stream.pending(), 0);
    }

    #[test]
    fn failed_drain_discards_buffered_bytes() {
        let transport = RecordingWriter::new().failing_on_write(1);
        let handle = transport.clone();
        let options = StreamOptions::new().with_capacity(2);
        let mut stream = WriteStream::from_transport(Box::new(transport), &options).unwrap();

        assert!(matches!(stream.write(b"abcd"), Err(StreamError::Transport(_))));
        assert_eq!(stream.pending(), 0);
        stream.write(b"z").unwrap();
        stream.close().unwrap();
        assert_eq!(handle.writes(), vec![b"z".to_vec()]);
    }

    #[test]
    fn flush_with_failed_drain_skips_transport_flush() {
        let transport = RecordingWriter::new().failing_on_write(1);
        let handle = transport.clone();
        let options = StreamOptions::new().with_capacity(8);
        let mut stream = WriteStream::from_transport(Box::new(transport), &options).unwrap();

        stream.write(b"lost").unwrap();
        assert!(matches!(stream.flush(), Err(StreamError::Transport(_))));
        assert_eq!(handle.flushes(), 0);
        assert_eq!(stream.pending(), 0);
        assert!(handle.writes().is_empty());
    }

    #[test]
    fn io_write_reports_short_write_after_partial_delivery() {
        use std::io::Write;

        let transport = RecordingWriter::new().failing_on_write(2);
        let handle = transport.clone();
        let options = StreamOptions::new().with_capacity(2);
        let mut stream = WriteStream::from_transport(Box::new(transport), &options).unwrap();

        assert_eq!(Write::write(&mut stream, b"abcdef").unwrap(), 2);
        assert_eq!(handle.writes(), vec![b"ab".to_vec()]);
        assert_eq!(stream.pending(), 0);
    }

    #[test]
    fn io_write_reports_error_when_nothing_was_delivered() {
        use std::io::Write;

        let transport = RecordingWriter::new().failing_on_write(1);
        let options = StreamOptions::new().with_capacity(2);
        let mut stream = WriteStream::from_transport(Box::new(transport), &options).unwrap();

        let error = Write::write(&mut stream, b"abcd").unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn close_reports_drain_failure_but_still_closes() {
        let transport = RecordingWriter::new().failing_on_write(1);
        let handle = transport.clone();
        let options = StreamOptions::new().with_capacity(8);
        let mut stream = WriteStream::from_transport(Box::new(transport), &options).unwrap();

        stream.write(b"xy").unwrap();
        assert!(stream.close().is_err());
        assert_eq!(handle.closes(), 1);
    }

    #[test]
    fn close_failure_is_reported() {
        let transport = RecordingWriter::new().failing_on_close();
        let handle = transport.clone();
        let options = StreamOptions::new().with_capacity(8);
        let stream = WriteStream::from_transport(Box::new(transport), &options).unwrap();

        assert!(matches!(stream.close(), Err(StreamError::Transport(_))));
        assert_eq!(handle.closes(), 1);
    }

    #[test]
    fn drop_drains_pending_bytes() {
        let (mut stream, handle) = stream(8);
        stream.write(b"tail").unwrap();
        drop(stream);
        assert_eq!(handle.writes(), vec![b"tail".to_vec()]);
        assert_eq!(handle.closes(), 1);
    }

    #[test]
    fn resize_only_before_first_write() {
        let (mut stream, _) = stream(4);
        stream.resize(2).unwrap();
        assert_eq!(stream.capacity(), 2);
        stream.write(b"ab").unwrap();
        assert_eq!(stream.pending(), 0);
        assert!(matches!(stream.resize(8), Err(StreamError::BufferInUse)));
        assert!(matches!(stream.resize(0), Err(StreamError::ZeroCapacity)));
    }

    #[test]
    fn empty_write_keeps_stream_pristine() {
        let (mut stream, _) = stream(4);
        assert_eq!(stream.write(&[]).unwrap(), 0);
        stream.resize(16).unwrap();
        assert_eq!(stream.capacity(), 16);
    }

    #[test]
    fn io_write_adapter_forwards_bytes() {
        use std::io::Write;

        let (mut stream, handle) = stream(4);
        write!(stream, "{}-{}", 12, 34).unwrap();
        Write::flush(&mut stream).unwrap();
        let joined: Vec<u8> = handle.writes().concat();
        assert_eq!(joined, b"12-34");
    }
}
