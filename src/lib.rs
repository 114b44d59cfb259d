#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod config;
mod context;
mod error;
mod handle;
mod marshal;

#[cfg(feature = "native")]
/// Bindings to the [`OpenZL` C library](https://github.com/facebook/openzl)
pub mod native;

#[cfg(test)]
mod testing;

pub use backend::{NativeApi, NativeHandle, Report};
pub use config::{Config, DecompressStrategy, GUESS_EXPANSION_FACTOR, MIN_GUESS_CAPACITY};
pub use context::Context;
pub use error::{Error, Result, LOCAL_ERROR_CODE};

/// Low-level compression interface using caller-provided buffers.
///
/// Writes into a pre-allocated slice and returns the sub-slice holding exactly
/// what was written. Lets callers reuse buffers across calls.
///
/// # Buffer Sizing
///
/// Caller must ensure output buffers are large enough; an undersized buffer
/// is reported by the native library as an error, the call is not retried.
pub trait CodecToSlice {
    /// Error type returned by compression/decompression operations.
    type Error;

    /// Compresses input into output buffer, returning slice of data written.
    fn compress_to_slice<'out>(
        &mut self,
        input: &[u8],
        output: &'out mut [u8],
    ) -> Result<&'out [u8], Self::Error>;

    /// Decompresses input into output buffer, returning slice of data written.
    fn decompress_to_slice<'out>(
        &mut self,
        input: &[u8],
        output: &'out mut [u8],
    ) -> Result<&'out [u8], Self::Error>;
}
