//! Stream configuration.

use compress::CompressionLevel;

/// Default buffer capacity for new streams (64 KiB).
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Options applied when a stream is opened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamOptions {
    /// Buffer capacity in bytes.
    pub capacity: usize,
    /// Compression level used by write streams. Ignored when reading.
    pub level: CompressionLevel,
}

impl StreamOptions {
    /// Returns the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            level: CompressionLevel::Default,
        }
    }

    /// Sets the buffer capacity.
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the compression level for write streams.
    pub const fn with_level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self::new()
    }
}
