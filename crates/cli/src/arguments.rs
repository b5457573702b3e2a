//! Command definition and argument parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::{PathBufValueParser, RangedU64ValueParser};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use compress::{CompressionAlgorithm, CompressionLevel};
use stream::StreamOptions;

/// Program name used for clap output and diagnostics.
pub(crate) const PROGRAM_NAME: &str = "zbuf";

/// Fully parsed invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ParsedArgs {
    pub(crate) verbosity: u8,
    pub(crate) options: StreamOptions,
    pub(crate) command: Subcommand,
}

/// The operation selected on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Subcommand {
    Cat {
        algorithm: Option<CompressionAlgorithm>,
        files: Vec<PathBuf>,
    },
    Convert {
        input_algorithm: Option<CompressionAlgorithm>,
        output_algorithm: Option<CompressionAlgorithm>,
        input: PathBuf,
        output: PathBuf,
    },
    Lines {
        algorithm: Option<CompressionAlgorithm>,
        delimiter: u8,
        files: Vec<PathBuf>,
    },
}

fn algorithm_arg(id: &'static str, short: char, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .short(short)
        .long(long)
        .value_name("ALGO")
        .help(help)
        .action(ArgAction::Set)
        .value_parser(|value: &str| value.parse::<CompressionAlgorithm>())
}

fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILE")
        .help("Files to read; '-' reads standard input.")
        .required(true)
        .num_args(1..)
        .action(ArgAction::Append)
        .value_parser(PathBufValueParser::new())
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Buffered, compression-aware byte streams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase diagnostic output (repeatable).")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("buffer-size")
                .long("buffer-size")
                .value_name("BYTES")
                .help("Stream buffer capacity in bytes.")
                .action(ArgAction::Set)
                .global(true)
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..)),
        )
        .subcommand(
            Command::new("cat")
                .about("Decode files to standard output.")
                .arg(algorithm_arg(
                    "algorithm",
                    'a',
                    "algorithm",
                    "Input algorithm; detected from each file when omitted.",
                ))
                .arg(files_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Re-encode INPUT into OUTPUT.")
                .arg(algorithm_arg(
                    "input-algorithm",
                    'i',
                    "input-algorithm",
                    "Algorithm of INPUT; detected when omitted.",
                ))
                .arg(algorithm_arg(
                    "algorithm",
                    'a',
                    "algorithm",
                    "Algorithm of OUTPUT; detected from its name when omitted.",
                ))
                .arg(
                    Arg::new("level")
                        .short('l')
                        .long("level")
                        .value_name("LEVEL")
                        .help("Compression level for OUTPUT (1-9).")
                        .action(ArgAction::Set)
                        .value_parser(|value: &str| -> Result<CompressionLevel, String> {
                            let numeric = value
                                .parse::<u32>()
                                .map_err(|_| format!("invalid level '{value}'"))?;
                            CompressionLevel::from_numeric(numeric).map_err(|error| error.to_string())
                        }),
                )
                .arg(
                    Arg::new("input")
                        .value_name("INPUT")
                        .required(true)
                        .value_parser(PathBufValueParser::new()),
                )
                .arg(
                    Arg::new("output")
                        .value_name("OUTPUT")
                        .required(true)
                        .value_parser(PathBufValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("lines")
                .about("Count delimiter-terminated records in each file.")
                .arg(algorithm_arg(
                    "algorithm",
                    'a',
                    "algorithm",
                    "Input algorithm; detected from each file when omitted.",
                ))
                .arg(
                    Arg::new("delimiter")
                        .short('d')
                        .long("delimiter")
                        .value_name("BYTE")
                        .help("Record delimiter: one character, an escape (\\n, \\t, \\0), or a decimal byte.")
                        .action(ArgAction::Set)
                        .value_parser(parse_delimiter),
                )
                .arg(files_arg()),
        )
}

/// Parses a delimiter given as a single character, a backslash escape, or a
/// decimal byte value.
pub(crate) fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        b"\\n" => Ok(b'\n'),
        b"\\t" => Ok(b'\t'),
        b"\\0" => Ok(0),
        _ => value
            .parse::<u8>()
            .map_err(|_| format!("invalid delimiter '{value}': expected a single byte")),
    }
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let verbosity = matches.get_count("verbose");
    let mut options = StreamOptions::default();
    if let Some(capacity) = matches.remove_one::<usize>("buffer-size") {
        options = options.with_capacity(capacity);
    }

    let Some((name, mut sub)) = matches.remove_subcommand() else {
        return Err(clap_command().error(ErrorKind::MissingSubcommand, "a subcommand is required"));
    };
    let command = match name.as_str() {
        "cat" => Subcommand::Cat {
            algorithm: sub.remove_one("algorithm"),
            files: remove_files(&mut sub),
        },
        "convert" => {
            if let Some(level) = sub.remove_one::<CompressionLevel>("level") {
                options = options.with_level(level);
            }
            Subcommand::Convert {
                input_algorithm: sub.remove_one("input-algorithm"),
                output_algorithm: sub.remove_one("algorithm"),
                input: sub.remove_one("input").unwrap_or_default(),
                output: sub.remove_one("output").unwrap_or_default(),
            }
        }
        _ => Subcommand::Lines {
            algorithm: sub.remove_one("algorithm"),
            delimiter: sub.remove_one("delimiter").unwrap_or(b'\n'),
            files: remove_files(&mut sub),
        },
    };

    Ok(ParsedArgs {
        verbosity,
        options,
        command,
    })
}

fn remove_files(matches: &mut ArgMatches) -> Vec<PathBuf> {
    matches
        .remove_many::<PathBuf>("files")
        .map(Iterator::collect)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        clap_command().debug_assert();
    }

    #[test]
    fn cat_collects_files_and_algorithm() {
        let parsed = parse_args(["zbuf", "cat", "-a", "gz", "a.txt", "b"]).unwrap();
        assert_eq!(
            parsed.command,
            Subcommand::Cat {
                algorithm: Some(CompressionAlgorithm::Gzip),
                files: vec![PathBuf::from("a.txt"), PathBuf::from("b")],
            }
        );
        assert_eq!(parsed.verbosity, 0);
    }

    #[test]
    fn global_options_apply_after_subcommand() {
        let parsed = parse_args(["zbuf", "cat", "-vv", "--buffer-size", "128", "-"]).unwrap();
        assert_eq!(parsed.verbosity, 2);
        assert_eq!(parsed.options.capacity, 128);
    }

    #[test]
    fn zero_buffer_size_is_rejected() {
        assert!(parse_args(["zbuf", "--buffer-size", "0", "cat", "x"]).is_err());
    }

    #[test]
    fn convert_parses_level() {
        let parsed =
            parse_args(["zbuf", "convert", "-i", "plain", "-l", "9", "in", "out.zst"]).unwrap();
        assert_eq!(parsed.options.level, CompressionLevel::from_numeric(9).unwrap());
        assert_eq!(
            parsed.command,
            Subcommand::Convert {
                input_algorithm: Some(CompressionAlgorithm::Plain),
                output_algorithm: None,
                input: PathBuf::from("in"),
                output: PathBuf::from("out.zst"),
            }
        );
    }

    #[test]
    fn out_of_range_level_is_rejected() {
        assert!(parse_args(["zbuf", "convert", "-l", "12", "in", "out"]).is_err());
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        assert!(parse_args(["zbuf", "cat", "-a", "lzma", "file"]).is_err());
    }

    #[test]
    fn lines_defaults_to_newline() {
        let parsed = parse_args(["zbuf", "lines", "f"]).unwrap();
        assert!(matches!(parsed.command, Subcommand::Lines { delimiter: b'\n', .. }));
    }

    #[test]
    fn delimiter_forms() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("\\0").unwrap(), 0);
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("59").unwrap(), b';');
        assert!(parse_delimiter("256").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
