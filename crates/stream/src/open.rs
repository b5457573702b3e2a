//! Mode-string entry points returning either stream direction.

use std::path::Path;

#[cfg(unix)]
use std::os::fd::OwnedFd;

use compress::CompressionAlgorithm;

use crate::error::StreamError;
use crate::mode::Direction;
use crate::options::StreamOptions;
use crate::reader::ReadStream;
use crate::writer::WriteStream;

/// A stream opened through a mode string.
#[derive(Debug)]
pub enum Stream {
    /// Opened with a mode starting with `r`.
    Read(ReadStream),
    /// Opened with a mode starting with `w`.
    Write(WriteStream),
}

impl Stream {
    /// Direction fixed at open time.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::Read(_) => Direction::Read,
            Self::Write(_) => Direction::Write,
        }
    }

    /// Algorithm the stream was opened with.
    #[must_use]
    pub const fn algorithm(&self) -> CompressionAlgorithm {
        match self {
            Self::Read(stream) => stream.algorithm(),
            Self::Write(stream) => stream.algorithm(),
        }
    }

    /// Returns the read stream, or `None` for a write stream.
    #[must_use]
    pub fn into_reader(self) -> Option<ReadStream> {
        match self {
            Self::Read(stream) => Some(stream),
            Self::Write(_) => None,
        }
    }

    /// Returns the write stream, or `None` for a read stream.
    #[must_use]
    pub fn into_writer(self) -> Option<WriteStream> {
        match self {
            Self::Write(stream) => Some(stream),
            Self::Read(_) => None,
        }
    }

    /// Closes the underlying stream.
    pub fn close(self) -> Result<(), StreamError> {
        match self {
            Self::Read(stream) => stream.close(),
            Self::Write(stream) => stream.close(),
        }
    }
}

/// Opens `path` in `mode` with default options.
///
/// See [`open_with`].
pub fn open(
    path: impl AsRef<Path>,
    mode: &str,
    algorithm: Option<CompressionAlgorithm>,
) -> Result<Stream, StreamError> {
    open_with(path, mode, algorithm, &StreamOptions::default())
}

/// Opens `path` in `mode`, resolving a missing algorithm from the path.
///
/// The mode is validated before anything touches the filesystem. Nothing is
/// returned unless both the buffer and the transport were set up.
pub fn open_with(
    path: impl AsRef<Path>,
    mode: &str,
    algorithm: Option<CompressionAlgorithm>,
    options: &StreamOptions,
) -> Result<Stream, StreamError> {
    match Direction::from_mode(mode)? {
        Direction::Read => ReadStream::open_with(path, algorithm, options).map(Stream::Read),
        Direction::Write => WriteStream::create_with(path, algorithm, options).map(Stream::Write),
    }
}

/// Opens a stream over an owned descriptor.
///
/// A descriptor carries no name to detect from, so `algorithm` must be given.
/// On failure the descriptor is closed.
#[cfg(unix)]
pub fn open_fd(
    fd: OwnedFd,
    mode: &str,
    algorithm: Option<CompressionAlgorithm>,
    options: &StreamOptions,
) -> Result<Stream, StreamError> {
    let direction = Direction::from_mode(mode)?;
    let algorithm = algorithm.ok_or(StreamError::AlgorithmRequired)?;
    match direction {
        Direction::Read => ReadStream::open_fd(fd, algorithm, options).map(Stream::Read),
        Direction::Write => WriteStream::open_fd(fd, algorithm, options).map(Stream::Write),
    }
}
