//! Error type shared by read and write streams.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use compress::OpenError;

/// Error returned by stream operations.
///
/// End of source is not an error: it is reported through the `Ok` value of
/// the read operations.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The mode string did not start with `r` or `w`.
    #[error("invalid stream mode {0:?}: expected a mode starting with 'r' or 'w'")]
    InvalidMode(String),

    /// No algorithm was supplied and none could be detected for the path.
    #[error("cannot determine compression algorithm for {}", .0.display())]
    UnresolvedAlgorithm(PathBuf),

    /// A descriptor stream was opened without an explicit algorithm.
    #[error("descriptor streams require an explicit compression algorithm")]
    AlgorithmRequired,

    /// A zero-byte buffer was requested.
    #[error("stream buffer capacity must be at least one byte")]
    ZeroCapacity,

    /// The buffer was resized after the stream had been used.
    #[error("stream buffer cannot be resized once data has passed through it")]
    BufferInUse,

    /// `unget_char` had no eligible byte to push back.
    #[error("no byte available to push back")]
    PushbackUnavailable,

    /// The stream buffer or a caller's destination buffer could not grow.
    #[error("failed to allocate buffer: {0}")]
    Allocation(#[from] TryReserveError),

    /// The transport could not be opened.
    #[error(transparent)]
    Open(#[from] OpenError),

    /// The transport failed while reading, writing, flushing, or closing.
    #[error("transport failure: {0}")]
    Transport(#[from] io::Error),
}

impl StreamError {
    /// Returns `true` for errors caused by misuse of the stream API rather
    /// than by the environment.
    #[must_use]
    pub const fn is_invalid_use(&self) -> bool {
        matches!(
            self,
            Self::InvalidMode(_)
                | Self::AlgorithmRequired
                | Self::ZeroCapacity
                | Self::BufferInUse
                | Self::PushbackUnavailable
        )
    }

    pub(crate) fn released() -> Self {
        Self::Transport(io::Error::other("stream transport already released"))
    }
}

impl From<StreamError> for io::Error {
    fn from(error: StreamError) -> Self {
        match error {
            StreamError::Transport(source) => source,
            StreamError::Open(OpenError::Io { source, .. }) => source,
            other @ StreamError::Allocation(_) => Self::new(io::ErrorKind::OutOfMemory, other),
            other if other.is_invalid_use() => Self::new(io::ErrorKind::InvalidInput, other),
            other => Self::other(other),
        }
    }
}
