//! Enumeration of the transport algorithms a stream can be opened with.

use core::fmt;
use core::str::FromStr;

/// Transport algorithms recognised by the workspace.
///
/// An unresolved algorithm is expressed as `Option::<CompressionAlgorithm>::None`
/// by the APIs that accept one; an opened stream always carries a concrete
/// variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompressionAlgorithm {
    /// Uncompressed pass-through I/O.
    Plain,
    /// gzip framing around deflate (`.gz`).
    Gzip,
    /// bzip2 block compression (`.bz2`).
    Bzip2,
    /// Zstandard frames (`.zst`).
    Zstd,
}

impl CompressionAlgorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [Self; 4] = [Self::Plain, Self::Gzip, Self::Bzip2, Self::Zstd];

    /// Returns the canonical display name used for diagnostics and CLI parsing.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Zstd => "zstd",
        }
    }

    /// Returns the conventional file name extension, including the leading dot.
    #[must_use]
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Gzip => Some(".gz"),
            Self::Bzip2 => Some(".bz2"),
            Self::Zstd => Some(".zst"),
        }
    }

    /// Maps a file name extension (with its leading dot) to an algorithm.
    ///
    /// Unrecognised extensions, and the empty string, map to [`Self::Plain`].
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            ".gz" => Self::Gzip,
            ".bz2" => Self::Bzip2,
            ".zst" => Self::Zstd,
            _ => Self::Plain,
        }
    }

    /// Reports whether the codec backing this algorithm was compiled into the build.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Plain | Self::Gzip => true,
            Self::Bzip2 => cfg!(feature = "bzip2"),
            Self::Zstd => cfg!(feature = "zstd"),
        }
    }

    /// Returns the algorithms available in the current build.
    #[must_use]
    pub fn available() -> Vec<Self> {
        Self::ALL.into_iter().filter(|algorithm| algorithm.is_available()).collect()
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when attempting to parse an unsupported algorithm name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompressionAlgorithmParseError {
    input: String,
}

impl CompressionAlgorithmParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for CompressionAlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported compression algorithm: {}", self.input)
    }
}

impl std::error::Error for CompressionAlgorithmParseError {}

impl FromStr for CompressionAlgorithm {
    type Err = CompressionAlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "none" | "raw" => Ok(Self::Plain),
            "gzip" | "gz" => Ok(Self::Gzip),
            "bzip2" | "bz2" => Ok(Self::Bzip2),
            "zstd" | "zst" => Ok(Self::Zstd),
            other => Err(CompressionAlgorithmParseError::new(other)),
        }
    }
}
