/// Smallest buffer allocated by [`DecompressStrategy::BoundedGuess`].
pub const MIN_GUESS_CAPACITY: usize = 1024;

/// Expansion factor assumed by [`DecompressStrategy::BoundedGuess`].
pub const GUESS_EXPANSION_FACTOR: usize = 4;

/// How the decompressed output buffer is sized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecompressStrategy {
    /// Ask the library for the exact decompressed size, then allocate it.
    #[default]
    ExactSize,
    /// Allocate `max(4 * input, 1024)` bytes and decompress with the context.
    ///
    /// Fails if the guess is too small; there is no retry with a larger buffer.
    BoundedGuess,
}

impl DecompressStrategy {
    pub(crate) fn guess_capacity(src_len: usize) -> usize {
        src_len
            .saturating_mul(GUESS_EXPANSION_FACTOR)
            .max(MIN_GUESS_CAPACITY)
    }
}

/// Parameters applied to a context when it is created.
///
/// ```
/// use openzl::{Config, DecompressStrategy};
///
/// let config = Config::default()
///     .with_compression_level(3)
///     .with_decompress_strategy(DecompressStrategy::BoundedGuess);
/// assert_eq!(config.compression_level, Some(3));
/// assert_eq!(config.format_version, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Compression level. `None` keeps the library default.
    pub compression_level: Option<i32>,
    /// Frame format version to emit. `None` keeps the library default.
    pub format_version: Option<u32>,
    /// How output buffers are sized when decompressing.
    pub decompress_strategy: DecompressStrategy,
}

impl Config {
    #[must_use]
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_format_version(mut self, version: u32) -> Self {
        self.format_version = Some(version);
        self
    }

    #[must_use]
    pub fn with_decompress_strategy(mut self, strategy: DecompressStrategy) -> Self {
        self.decompress_strategy = strategy;
        self
    }
}
