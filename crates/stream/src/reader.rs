//! Buffered read stream.

use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::fd::OwnedFd;

use compress::{CompressionAlgorithm, ReadTransport};

use crate::buffer::StreamBuffer;
use crate::error::StreamError;
use crate::options::StreamOptions;
use crate::until::reserve_geometric;

/// Read-only stream that refills a fixed buffer from a transport.
///
/// Refills replace the buffer contents wholesale. Once a refill delivers
/// fewer bytes than the buffer holds, the source is considered exhausted and
/// no further refill is attempted.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use compress::{CompressionAlgorithm, reader_for};
/// use stream::{ReadStream, StreamOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = reader_for(Cursor::new(b"one\ntwo\n".to_vec()), CompressionAlgorithm::Plain)?;
/// let mut stream = ReadStream::from_transport(transport, &StreamOptions::new().with_capacity(3))?;
///
/// let mut line = Vec::new();
/// assert_eq!(stream.read_line(&mut line)?, 4);
/// assert_eq!(line, b"one\n");
/// assert_eq!(stream.get_char()?, Some(b't'));
/// stream.unget_char()?;
/// assert_eq!(stream.read_line(&mut line)?, 4);
/// assert_eq!(line, b"two\n");
/// assert_eq!(stream.read_line(&mut line)?, 0);
/// stream.close()?;
/// # Ok(())
/// # }
/// ```
pub struct ReadStream {
    buffer: StreamBuffer,
    transport: Option<Box<dyn ReadTransport>>,
    algorithm: CompressionAlgorithm,
    exhausted: bool,
    last_byte: Option<u8>,
}

impl ReadStream {
    /// Opens `path` for reading with default options.
    ///
    /// When `algorithm` is `None` it is detected from the path.
    pub fn open(
        path: impl AsRef<Path>,
        algorithm: Option<CompressionAlgorithm>,
    ) -> Result<Self, StreamError> {
        Self::open_with(path, algorithm, &StreamOptions::default())
    }

    /// Opens `path` for reading with explicit options.
    pub fn open_with(
        path: impl AsRef<Path>,
        algorithm: Option<CompressionAlgorithm>,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let path = path.as_ref();
        let algorithm = crate::resolve_algorithm(path, algorithm)?;
        let buffer = StreamBuffer::with_capacity(options.capacity)?;
        let transport = compress::open_reader(path, algorithm)?;
        logging::trace_open!(
            path = %path.display(),
            %algorithm,
            capacity = options.capacity,
            "opened read stream"
        );
        Ok(Self::from_parts(buffer, transport))
    }

    /// Takes ownership of `fd` and reads from it through `algorithm`.
    #[cfg(unix)]
    pub fn open_fd(
        fd: OwnedFd,
        algorithm: CompressionAlgorithm,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let buffer = StreamBuffer::with_capacity(options.capacity)?;
        let transport = compress::open_fd_reader(fd, algorithm)?;
        logging::trace_open!(%algorithm, capacity = options.capacity, "opened read stream on descriptor");
        Ok(Self::from_parts(buffer, transport))
    }

    /// Wraps an already-open transport.
    pub fn from_transport(
        transport: Box<dyn ReadTransport>,
        options: &StreamOptions,
    ) -> Result<Self, StreamError> {
        let buffer = StreamBuffer::with_capacity(options.capacity)?;
        Ok(Self::from_parts(buffer, transport))
    }

    fn from_parts(buffer: StreamBuffer, transport: Box<dyn ReadTransport>) -> Self {
        Self {
            buffer,
            algorithm: transport.algorithm(),
            transport: Some(transport),
            exhausted: false,
            last_byte: None,
        }
    }

    /// Algorithm the stream decodes with.
    #[must_use]
    pub const fn algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }

    /// Current buffer capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// `true` once the source is exhausted and every buffered byte was consumed.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.exhausted && self.buffer.is_drained()
    }

    /// Copies up to `dest.len()` bytes into `dest`, refilling as needed.
    ///
    /// Returns the number of bytes copied; fewer than requested only at end
    /// of source, and `0` when the source was already exhausted. Always
    /// cancels pushback eligibility.
    ///
    /// When a refill fails part-way through, the error is returned and the
    /// bytes already copied into `dest` by this call are consumed but not
    /// counted. The source is treated as exhausted afterwards, so later calls
    /// return `0` instead of retrying the transport.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize, StreamError> {
        let result = self.read_into(dest);
        self.last_byte = None;
        result
    }

    fn read_into(&mut self, dest: &mut [u8]) -> Result<usize, StreamError> {
        let mut copied = 0;
        while copied < dest.len() && self.more_data()? {
            let available = self.buffer.unread();
            let amount = available.len().min(dest.len() - copied);
            dest[copied..copied + amount].copy_from_slice(&available[..amount]);
            self.buffer.consume(amount);
            copied += amount;
        }
        Ok(copied)
    }

    /// Returns the next byte, or `None` at end of source.
    ///
    /// The byte becomes eligible for a single [`unget_char`](Self::unget_char).
    /// Reaching end of source cancels any earlier eligibility.
    pub fn get_char(&mut self) -> Result<Option<u8>, StreamError> {
        if !self.more_data()? {
            self.last_byte = None;
            return Ok(None);
        }
        let byte = self.buffer.next_byte();
        self.last_byte = byte;
        Ok(byte)
    }

    /// Pushes the byte returned by the last [`get_char`](Self::get_char) back.
    ///
    /// Fails unless the previous operation was a successful `get_char` and the
    /// byte just before the cursor still matches it. At most one byte can be
    /// pushed back.
    pub fn unget_char(&mut self) -> Result<(), StreamError> {
        let byte = self.last_byte.ok_or(StreamError::PushbackUnavailable)?;
        if self.buffer.previous_byte() != Some(byte) {
            return Err(StreamError::PushbackUnavailable);
        }
        self.buffer.rewind_one();
        self.last_byte = None;
        logging::trace_pushback!(byte, "pushed back byte");
        Ok(())
    }

    /// Reads through the next `delimiter` into `dest`, replacing its contents.
    ///
    /// The delimiter is included when found. At end of source the remaining
    /// bytes are returned without one. `dest` grows geometrically (64 bytes
    /// minimum, then doubling) and keeps its allocation across calls; it is
    /// never shrunk. Returns the number of bytes stored, `0` at end of source.
    pub fn read_until(&mut self, dest: &mut Vec<u8>, delimiter: u8) -> Result<usize, StreamError> {
        dest.clear();
        self.last_byte = None;
        let mut found = false;
        while !found && self.more_data()? {
            let available = self.buffer.unread();
            let span = match memchr::memchr(delimiter, available) {
                Some(index) => {
                    found = true;
                    index + 1
                }
                None => available.len(),
            };
            reserve_geometric(dest, span)?;
            dest.extend_from_slice(&available[..span]);
            self.buffer.consume(span);
        }
        Ok(dest.len())
    }

    /// Reads through the next `\n`. See [`read_until`](Self::read_until).
    pub fn read_line(&mut self, dest: &mut Vec<u8>) -> Result<usize, StreamError> {
        self.read_until(dest, b'\n')
    }

    /// Replaces the buffer with one of `capacity` bytes.
    ///
    /// Only allowed before the first refill.
    pub fn resize(&mut self, capacity: usize) -> Result<(), StreamError> {
        if capacity == 0 {
            return Err(StreamError::ZeroCapacity);
        }
        if !self.buffer.is_pristine() || self.exhausted {
            return Err(StreamError::BufferInUse);
        }
        self.buffer.replace(capacity)
    }

    /// Closes the transport and releases the buffer.
    pub fn close(mut self) -> Result<(), StreamError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), StreamError> {
        match self.transport.take() {
            Some(transport) => {
                logging::trace_close!(algorithm = %self.algorithm, "closing read stream");
                transport.close().map_err(StreamError::Transport)
            }
            None => Ok(()),
        }
    }

    /// Ensures unread bytes are buffered, refilling when allowed.
    ///
    /// Returns `false` at end of source.
    fn more_data(&mut self) -> Result<bool, StreamError> {
        if self.buffer.is_drained() && !self.exhausted {
            self.fill()?;
        }
        Ok(!self.buffer.is_drained())
    }

    fn fill(&mut self) -> Result<(), StreamError> {
        self.last_byte = None;
        let transport = self
            .transport
            .as_deref_mut()
            .ok_or_else(StreamError::released)?;
        let capacity = self.buffer.capacity();
        let result = transport.read(self.buffer.storage_mut());
        let filled = *result.as_ref().unwrap_or(&0);
        self.buffer.set_filled(filled);
        if filled < capacity {
            self.exhausted = true;
        }
        logging::trace_fill!(filled, capacity, exhausted = self.exhausted, "refilled buffer");
        result.map(drop).map_err(StreamError::Transport)
    }
}

impl io::Read for ReadStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Self::read(self, buf).map_err(io::Error::from)
    }
}

impl Drop for ReadStream {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            tracing::warn!(target: logging::targets::CLOSE, %error, "failed to close read stream");
        }
    }
}

impl std::fmt::Debug for ReadStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadStream")
            .field("algorithm", &self.algorithm)
            .field("buffer", &self.buffer)
            .field("exhausted", &self.exhausted)
            .field("last_byte", &self.last_byte)
            .field("open", &self.transport.is_some())
            .finish()
    }
}
