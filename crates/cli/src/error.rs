//! Failures raised while executing a command.

use std::io;
use std::path::{Path, PathBuf};

use stream::StreamError;

/// Exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for invalid command-line usage.
pub const EXIT_USAGE: i32 = 1;
/// Exit code for stream or I/O failures while executing a command.
pub const EXIT_FAILURE: i32 = 2;

/// Error produced by a command after argument parsing succeeded.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    /// A stream operation on `path` failed.
    #[error("{}: {source}", .path.display())]
    Stream {
        path: PathBuf,
        #[source]
        source: StreamError,
    },

    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CommandError {
    pub(crate) fn stream(path: &Path, source: StreamError) -> Self {
        Self::Stream {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Reports whether the failure is a closed downstream pipe.
    pub(crate) fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(error) if error.kind() == io::ErrorKind::BrokenPipe)
    }
}
