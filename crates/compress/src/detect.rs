//! Algorithm auto-detection for paths opened without an explicit algorithm.
//!
//! Detection looks at the path string, then filesystem metadata, then the
//! file name extension. Standard input and non-seekable endpoints (FIFOs and
//! sockets) only ever carry plain data; directories never resolve.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::algorithm::CompressionAlgorithm;

/// Paths that name standard input and therefore always resolve to plain I/O.
pub const STDIN_PATHS: [&str; 2] = ["-", "/dev/stdin"];

/// Resolves the algorithm for `path`, or `None` when no algorithm applies.
///
/// Paths that do not exist fall through to the extension lookup so that
/// write targets resolve by name.
#[must_use]
pub fn detect_algorithm(path: &Path) -> Option<CompressionAlgorithm> {
    if STDIN_PATHS.iter().any(|stdin| path.as_os_str() == *stdin) {
        return Some(CompressionAlgorithm::Plain);
    }

    if let Ok(metadata) = fs::metadata(path) {
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            return None;
        }
        if is_stream_endpoint(&file_type) {
            return Some(CompressionAlgorithm::Plain);
        }
    }

    Some(algorithm_for_path_name(path))
}

/// Maps the extension of `path`'s final component to an algorithm.
///
/// The extension is everything from the last `.` in the file name. Names
/// without a dot, and unrecognised extensions, map to plain I/O.
#[must_use]
pub fn algorithm_for_path_name(path: &Path) -> CompressionAlgorithm {
    path.file_name()
        .and_then(OsStr::to_str)
        .and_then(|name| name.rfind('.').map(|dot| &name[dot..]))
        .map_or(CompressionAlgorithm::Plain, CompressionAlgorithm::from_extension)
}

#[cfg(unix)]
fn is_stream_endpoint(file_type: &fs::FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;

    file_type.is_fifo() || file_type.is_socket()
}

#[cfg(not(unix))]
fn is_stream_endpoint(_file_type: &fs::FileType) -> bool {
    false
}
