use thiserror::Error;

/// Code carried by errors that originate in this crate rather than in `OpenZL`.
pub const LOCAL_ERROR_CODE: i32 = -1;

/// Alias for the result type of `OpenZL` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur when using an `OpenZL` context.
///
/// Native failures keep the code reported by the library verbatim.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The native library could not allocate a context
    #[error("failed to create OpenZL context")]
    HandleCreation,

    /// The native handle is null
    #[error("invalid context")]
    InvalidContext,

    /// The context was closed
    #[error("context is closed")]
    ClosedContext,

    /// The native library could not determine the decompressed size
    #[error("failed to get decompressed size: error code {code}")]
    SizeQuery { code: i32 },

    /// The native compressor reported a failure
    #[error(
        "compression failed with error code {code} (data size: {src_len}, buffer size: {dst_capacity})"
    )]
    Compression {
        code: i32,
        src_len: usize,
        dst_capacity: usize,
    },

    /// The native decompressor reported a failure
    #[error(
        "decompression failed with error code {code} (data size: {src_len}, buffer size: {dst_capacity})"
    )]
    Decompression {
        code: i32,
        src_len: usize,
        dst_capacity: usize,
    },

    /// The native library reported writing more bytes than the buffer holds
    #[error("native call reported {written} bytes written into a {capacity} byte buffer")]
    SizeOutOfBounds { written: usize, capacity: usize },

    /// An output buffer of the requested size could not be allocated
    #[error("failed to allocate a {size} byte output buffer")]
    Allocation { size: usize },
}

impl Error {
    /// Numeric code of this error.
    ///
    /// Errors raised by the native library return the library's own code,
    /// everything else returns [`LOCAL_ERROR_CODE`].
    pub fn code(&self) -> i32 {
        match self {
            Error::SizeQuery { code }
            | Error::Compression { code, .. }
            | Error::Decompression { code, .. } => *code,
            Error::HandleCreation
            | Error::InvalidContext
            | Error::ClosedContext
            | Error::SizeOutOfBounds { .. }
            | Error::Allocation { .. } => LOCAL_ERROR_CODE,
        }
    }
}
