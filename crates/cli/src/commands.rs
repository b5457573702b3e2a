//! Implementations of the `cat`, `convert`, and `lines` subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};

use compress::CompressionAlgorithm;
use stream::{ReadStream, StreamError, StreamOptions, WriteStream};

use crate::error::CommandError;

/// Outcome of a command that processes several files independently.
///
/// Every file is attempted; failures are collected so the caller can report
/// each one and still exit non-zero.
#[derive(Debug, Default)]
pub(crate) struct Report {
    pub(crate) failures: Vec<CommandError>,
}

impl Report {
    fn record(&mut self, result: Result<(), CommandError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                let keep_going = !error.is_broken_pipe();
                self.failures.push(error);
                keep_going
            }
        }
    }
}

/// Decodes every file in `files` to `stdout`.
pub(crate) fn cat<W: Write>(
    files: &[PathBuf],
    algorithm: Option<CompressionAlgorithm>,
    options: &StreamOptions,
    stdout: &mut W,
) -> Report {
    let mut report = Report::default();
    for path in files {
        if !report.record(cat_one(path, algorithm, options, stdout)) {
            break;
        }
    }
    if let Err(error) = stdout.flush() {
        report.record(Err(CommandError::Output(error)));
    }
    report
}

fn cat_one<W: Write>(
    path: &Path,
    algorithm: Option<CompressionAlgorithm>,
    options: &StreamOptions,
    stdout: &mut W,
) -> Result<(), CommandError> {
    let mut reader = ReadStream::open_with(path, algorithm, options)
        .map_err(|source| CommandError::stream(path, source))?;
    let mut chunk =
        copy_buffer(reader.capacity()).map_err(|source| CommandError::stream(path, source))?;
    let mut total = 0usize;
    loop {
        let copied = reader
            .read(&mut chunk)
            .map_err(|source| CommandError::stream(path, source))?;
        if copied == 0 {
            break;
        }
        stdout
            .write_all(&chunk[..copied])
            .map_err(CommandError::Output)?;
        total += copied;
    }
    reader
        .close()
        .map_err(|source| CommandError::stream(path, source))?;
    logging::trace_command!(command = "cat", path = %path.display(), bytes = total, "decoded file");
    Ok(())
}

/// Re-encodes `input` into `output`.
///
/// The output stream is closed even when copying fails, which finalises
/// whatever was written so far.
pub(crate) fn convert(
    input: &Path,
    input_algorithm: Option<CompressionAlgorithm>,
    output: &Path,
    output_algorithm: Option<CompressionAlgorithm>,
    options: &StreamOptions,
) -> Result<u64, CommandError> {
    let mut reader = ReadStream::open_with(input, input_algorithm, options)
        .map_err(|source| CommandError::stream(input, source))?;
    let mut writer = WriteStream::create_with(output, output_algorithm, options)
        .map_err(|source| CommandError::stream(output, source))?;

    let mut chunk =
        copy_buffer(reader.capacity()).map_err(|source| CommandError::stream(input, source))?;
    let copied = copy_stream(&mut reader, &mut writer, &mut chunk);
    let closed = writer.close();
    let total = copied.map_err(|error| match error {
        CopyError::Read(source) => CommandError::stream(input, source),
        CopyError::Write(source) => CommandError::stream(output, source),
    })?;
    closed.map_err(|source| CommandError::stream(output, source))?;
    reader
        .close()
        .map_err(|source| CommandError::stream(input, source))?;

    logging::trace_command!(
        command = "convert",
        input = %input.display(),
        output = %output.display(),
        bytes = total,
        "converted stream"
    );
    Ok(total)
}

fn copy_stream(
    reader: &mut ReadStream,
    writer: &mut WriteStream,
    chunk: &mut [u8],
) -> Result<u64, CopyError> {
    let mut total = 0u64;
    loop {
        let copied = reader.read(chunk).map_err(CopyError::Read)?;
        if copied == 0 {
            return Ok(total);
        }
        writer.write(&chunk[..copied]).map_err(CopyError::Write)?;
        total += copied as u64;
    }
}

/// Allocates a zeroed copy buffer of `len` bytes, failing instead of aborting.
fn copy_buffer(len: usize) -> Result<Vec<u8>, StreamError> {
    let mut chunk = Vec::new();
    chunk.try_reserve_exact(len)?;
    chunk.resize(len, 0);
    Ok(chunk)
}

/// Side of a copy that failed, so the right path ends up in the diagnostic.
enum CopyError {
    Read(StreamError),
    Write(StreamError),
}

/// Counts `delimiter`-terminated records in every file and prints one
/// `count<TAB>path` line per file, plus a total when several files are given.
///
/// A trailing record without a delimiter still counts.
pub(crate) fn lines<W: Write>(
    files: &[PathBuf],
    algorithm: Option<CompressionAlgorithm>,
    delimiter: u8,
    options: &StreamOptions,
    stdout: &mut W,
) -> Report {
    let mut report = Report::default();
    let mut record = Vec::new();
    let mut total = 0u64;
    for path in files {
        let counted = count_records(path, algorithm, delimiter, options, &mut record)
            .and_then(|count| {
                total += count;
                writeln!(stdout, "{count}\t{}", path.display()).map_err(CommandError::Output)
            });
        if !report.record(counted) {
            return report;
        }
    }
    if files.len() > 1 {
        let written = writeln!(stdout, "{total}\ttotal").map_err(CommandError::Output);
        report.record(written);
    }
    if let Err(error) = stdout.flush() {
        report.record(Err(CommandError::Output(error)));
    }
    report
}

fn count_records(
    path: &Path,
    algorithm: Option<CompressionAlgorithm>,
    delimiter: u8,
    options: &StreamOptions,
    record: &mut Vec<u8>,
) -> Result<u64, CommandError> {
    let mut reader = ReadStream::open_with(path, algorithm, options)
        .map_err(|source| CommandError::stream(path, source))?;
    let mut count = 0u64;
    while reader
        .read_until(record, delimiter)
        .map_err(|source| CommandError::stream(path, source))?
        > 0
    {
        count += 1;
    }
    reader
        .close()
        .map_err(|source| CommandError::stream(path, source))?;
    logging::trace_command!(command = "lines", path = %path.display(), records = count, "counted records");
    Ok(count)
}
