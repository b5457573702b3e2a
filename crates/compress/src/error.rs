use std::io;
use std::path::PathBuf;

use crate::algorithm::CompressionAlgorithm;

/// Error returned when a transport cannot be opened.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The codec for the requested algorithm was not compiled into this build.
    #[error("{0} support is not enabled in this build")]
    Unsupported(CompressionAlgorithm),

    /// The endpoint or codec could not be initialised.
    #[error("failed to open {path}: {source}")]
    Io {
        /// Path (or `<fd>`/`<stdin>` marker) that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl OpenError {
    /// Creates an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Extension trait attaching a path to I/O failures raised while opening.
pub(crate) trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, OpenError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T, OpenError> {
        self.map_err(|error| OpenError::io(path, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_includes_path() {
        let error = OpenError::io(
            "/path/to/file.gz",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let display = error.to_string();
        assert!(display.contains("/path/to/file.gz"));
        assert!(display.contains("not found"));
    }

    #[test]
    fn unsupported_display_names_algorithm() {
        let error = OpenError::Unsupported(CompressionAlgorithm::Zstd);
        assert_eq!(error.to_string(), "zstd support is not enabled in this build");
    }
}
