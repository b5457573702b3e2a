use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::fd::OwnedFd;

use crate::algorithm::CompressionAlgorithm;
use crate::error::{IoResultExt, OpenError};
use crate::gzip::{GzipReader, GzipWriter};
use crate::level::CompressionLevel;
use crate::plain::{PlainReader, PlainWriter};
use crate::transport::{ReadTransport, WriteTransport};

/// Path that selects standard input for readers and standard output for writers.
pub const STDIO_MARKER: &str = "-";

/// Reports whether `path` is the standard stream marker.
#[must_use]
pub fn is_stdio_path(path: &Path) -> bool {
    path.as_os_str() == STDIO_MARKER
}

/// Wraps any reader in a read transport for `algorithm`.
pub fn reader_for<R>(
    reader: R,
    algorithm: CompressionAlgorithm,
) -> Result<Box<dyn ReadTransport>, OpenError>
where
    R: Read + Send + 'static,
{
    wrap_reader(reader, algorithm, Path::new("<reader>"))
}

/// Wraps any writer in a write transport for `algorithm`.
pub fn writer_for<W>(
    writer: W,
    algorithm: CompressionAlgorithm,
    level: CompressionLevel,
) -> Result<Box<dyn WriteTransport>, OpenError>
where
    W: Write + Send + 'static,
{
    wrap_writer(writer, algorithm, level, Path::new("<writer>"))
}

/// Opens `path` for reading through `algorithm`.
///
/// The [`STDIO_MARKER`] path reads from standard input.
pub fn open_reader(
    path: &Path,
    algorithm: CompressionAlgorithm,
) -> Result<Box<dyn ReadTransport>, OpenError> {
    ensure_available(algorithm)?;
    if is_stdio_path(path) {
        return wrap_reader(io::stdin(), algorithm, Path::new("<stdin>"));
    }
    let file = File::open(path).with_path(path)?;
    wrap_reader(file, algorithm, path)
}

/// Creates (or truncates) `path` and writes to it through `algorithm`.
///
/// The [`STDIO_MARKER`] path writes to standard output.
pub fn open_writer(
    path: &Path,
    algorithm: CompressionAlgorithm,
    level: CompressionLevel,
) -> Result<Box<dyn WriteTransport>, OpenError> {
    ensure_available(algorithm)?;
    if is_stdio_path(path) {
        return wrap_writer(io::stdout(), algorithm, level, Path::new("<stdout>"));
    }
    let file = File::create(path).with_path(path)?;
    wrap_writer(file, algorithm, level, path)
}

/// Takes ownership of `fd` and reads from it through `algorithm`.
#[cfg(unix)]
pub fn open_fd_reader(
    fd: OwnedFd,
    algorithm: CompressionAlgorithm,
) -> Result<Box<dyn ReadTransport>, OpenError> {
    wrap_reader(File::from(fd), algorithm, Path::new("<fd>"))
}

/// Takes ownership of `fd` and writes to it through `algorithm`.
#[cfg(unix)]
pub fn open_fd_writer(
    fd: OwnedFd,
    algorithm: CompressionAlgorithm,
    level: CompressionLevel,
) -> Result<Box<dyn WriteTransport>, OpenError> {
    wrap_writer(File::from(fd), algorithm, level, Path::new("<fd>"))
}

fn ensure_available(algorithm: CompressionAlgorithm) -> Result<(), OpenError> {
    if algorithm.is_available() {
        Ok(())
    } else {
        Err(OpenError::Unsupported(algorithm))
    }
}

fn wrap_reader<R>(
    reader: R,
    algorithm: CompressionAlgorithm,
    path: &Path,
) -> Result<Box<dyn ReadTransport>, OpenError>
where
    R: Read + Send + 'static,
{
    match algorithm {
        CompressionAlgorithm::Plain => Ok(Box::new(PlainReader::new(reader))),
        CompressionAlgorithm::Gzip => Ok(Box::new(GzipReader::new(reader))),
        CompressionAlgorithm::Bzip2 => bzip2_reader(reader),
        CompressionAlgorithm::Zstd => zstd_reader(reader, path),
    }
}

fn wrap_writer<W>(
    writer: W,
    algorithm: CompressionAlgorithm,
    level: CompressionLevel,
    path: &Path,
) -> Result<Box<dyn WriteTransport>, OpenError>
where
    W: Write + Send + 'static,
{
    match algorithm {
        CompressionAlgorithm::Plain => Ok(Box::new(PlainWriter::new(writer))),
        CompressionAlgorithm::Gzip => Ok(Box::new(GzipWriter::new(writer, level))),
        CompressionAlgorithm::Bzip2 => bzip2_writer(writer, level),
        CompressionAlgorithm::Zstd => zstd_writer(writer, level, path),
    }
}

#[cfg(feature = "bzip2")]
fn bzip2_reader<R>(reader: R) -> Result<Box<dyn ReadTransport>, OpenError>
where
    R: Read + Send + 'static,
{
    Ok(Box::new(crate::bzip2::Bzip2Reader::new(reader)))
}

#[cfg(not(feature = "bzip2"))]
fn bzip2_reader<R>(_reader: R) -> Result<Box<dyn ReadTransport>, OpenError> {
    Err(OpenError::Unsupported(CompressionAlgorithm::Bzip2))
}

#[cfg(feature = "bzip2")]
fn bzip2_writer<W>(writer: W, level: CompressionLevel) -> Result<Box<dyn WriteTransport>, OpenError>
where
    W: Write + Send + 'static,
{
    Ok(Box::new(crate::bzip2::Bzip2Writer::new(writer, level)))
}

#[cfg(not(feature = "bzip2"))]
fn bzip2_writer<W>(
    _writer: W,
    _level: CompressionLevel,
) -> Result<Box<dyn WriteTransport>, OpenError> {
    Err(OpenError::Unsupported(CompressionAlgorithm::Bzip2))
}

#[cfg(feature = "zstd")]
fn zstd_reader<R>(reader: R, path: &Path) -> Result<Box<dyn ReadTransport>, OpenError>
where
    R: Read + Send + 'static,
{
    let decoder = crate::zstd::ZstdReader::new(reader).with_path(path)?;
    Ok(Box::new(decoder))
}

#[cfg(not(feature = "zstd"))]
fn zstd_reader<R>(_reader: R, _path: &Path) -> Result<Box<dyn ReadTransport>, OpenError> {
    Err(OpenError::Unsupported(CompressionAlgorithm::Zstd))
}

#[cfg(feature = "zstd")]
fn zstd_writer<W>(
    writer: W,
    level: CompressionLevel,
    path: &Path,
) -> Result<Box<dyn WriteTransport>, OpenError>
where
    W: Write + Send + 'static,
{
    let encoder = crate::zstd::ZstdWriter::new(writer, level).with_path(path)?;
    Ok(Box::new(encoder))
}

#[cfg(not(feature = "zstd"))]
fn zstd_writer<W>(
    _writer: W,
    _level: CompressionLevel,
    _path: &Path,
) -> Result<Box<dyn WriteTransport>, OpenError> {
    Err(OpenError::Unsupported(CompressionAlgorithm::Zstd))
}
