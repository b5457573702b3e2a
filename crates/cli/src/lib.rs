#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `zbuf` command-line front-end. It exposes three
//! subcommands built directly on [`stream`]:
//!
//! - `zbuf cat [-a ALGO] FILE...` decodes each file to standard output.
//! - `zbuf convert [-i ALGO] [-a ALGO] [-l LEVEL] INPUT OUTPUT` re-encodes a
//!   stream, detecting algorithms from the paths unless given.
//! - `zbuf lines [-a ALGO] [-d BYTE] FILE...` counts delimiter-terminated
//!   records with [`stream::ReadStream::read_until`].
//!
//! `-v` (repeatable) raises the log level of zbuf's tracing targets and
//! `--buffer-size` sets the stream buffer capacity.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error, so the whole front-end can be driven from tests
//! without spawning a process. A [`clap`](https://docs.rs/clap/) builder
//! definition performs the parse; the binary wires [`run`] into `main` via
//! [`exit_code_from`].
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Diagnostics go to the error handle, one per line, prefixed with `zbuf:`.
//! - Data goes to the output handle only.
//!
//! # Errors
//!
//! Usage errors exit with [`EXIT_USAGE`]. Stream and I/O failures exit with
//! [`EXIT_FAILURE`] after every remaining file has been attempted.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["zbuf", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("zbuf "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use logging::LogConfig;

mod arguments;
mod commands;
mod error;

use arguments::{PROGRAM_NAME, ParsedArgs, Subcommand, parse_args};
use commands::Report;
pub use error::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the command-line interface with the given arguments and handles.
///
/// The first argument is the program name, as with [`std::env::args_os`].
/// Returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => {
            init_logging(parsed.verbosity);
            execute(parsed, stdout, stderr)
        }
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = write!(stdout, "{}", error.render());
                EXIT_SUCCESS
            }
            _ => {
                let _ = write!(stderr, "{PROGRAM_NAME}: {}", error.render());
                EXIT_USAGE
            }
        },
    }
}

/// Installs the stderr subscriber for this process.
///
/// A subscriber installed earlier (by an embedding program or a previous
/// call) stays in place.
fn init_logging(verbosity: u8) {
    let config = LogConfig::from_verbose_level(verbosity);
    if logging::init_tracing(config).is_err() {
        tracing::debug!(target: logging::targets::COMMAND, "tracing subscriber already installed");
    }
}

fn execute<Out: Write, Err: Write>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32 {
    let ParsedArgs {
        options, command, ..
    } = parsed;
    let report = match command {
        Subcommand::Cat { algorithm, files } => commands::cat(&files, algorithm, &options, stdout),
        Subcommand::Convert {
            input_algorithm,
            output_algorithm,
            input,
            output,
        } => {
            let result =
                commands::convert(&input, input_algorithm, &output, output_algorithm, &options);
            Report {
                failures: result.err().into_iter().collect(),
            }
        }
        Subcommand::Lines {
            algorithm,
            delimiter,
            files,
        } => commands::lines(&files, algorithm, delimiter, &options, stdout),
    };
    finish(report, stderr)
}

fn finish<Err: Write>(report: Report, stderr: &mut Err) -> i32 {
    if report.failures.is_empty() {
        return EXIT_SUCCESS;
    }
    for failure in report.failures.iter().filter(|failure| !failure.is_broken_pipe()) {
        let _ = writeln!(stderr, "{PROGRAM_NAME}: {failure}");
    }
    EXIT_FAILURE
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
