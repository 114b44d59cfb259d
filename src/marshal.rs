//! Buffer marshalling between Rust byte slices and the native entry points.
//!
//! Every function here checks the handle, short-circuits empty input, sizes
//! the output, makes exactly one transforming foreign call and truncates the
//! result to the length the library reports.

use log::debug;

use crate::backend::{NativeApi, Report};
use crate::handle::ContextHandle;
use crate::{DecompressStrategy, Error, Result};

/// Native call outcome with the representation-specific encoding removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Written(usize),
    Failed(i32),
}

impl Status {
    /// Simple integer API: negative values are negated error codes.
    fn from_signed(result: i64) -> Self {
        if result < 0 {
            Status::Failed(i32::try_from(result.unsigned_abs()).unwrap_or(i32::MAX))
        } else {
            Status::Written(result as usize)
        }
    }

    /// Structured API: the report is tagged.
    fn from_report(report: Report) -> Self {
        if report.is_error() {
            Status::Failed(report.code())
        } else {
            Status::Written(report.value())
        }
    }
}

fn check_written(written: usize, capacity: usize) -> Result<usize> {
    if written > capacity {
        return Err(Error::SizeOutOfBounds { written, capacity });
    }
    Ok(written)
}

/// Allocates a zeroed output buffer, reporting failure instead of aborting.
///
/// Sizes come from the native library and, for the exact-size path, from the
/// frame header, so they are untrusted.
fn allocate(size: usize) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    if output.try_reserve_exact(size).is_err() {
        debug!("could not allocate {size} byte output buffer");
        return Err(Error::Allocation { size });
    }
    output.resize(size, 0);
    Ok(output)
}

fn compression_failed(code: i32, src_len: usize, dst_capacity: usize) -> Error {
    debug!("native compression failed with code {code}");
    Error::Compression {
        code,
        src_len,
        dst_capacity,
    }
}

fn decompression_failed(code: i32, src_len: usize, dst_capacity: usize) -> Error {
    debug!("native decompression failed with code {code}");
    Error::Decompression {
        code,
        src_len,
        dst_capacity,
    }
}

/// Compresses `input` into a freshly allocated buffer of the native bound.
pub(crate) fn compress<B: NativeApi>(
    handle: &mut ContextHandle<B>,
    input: &[u8],
) -> Result<Vec<u8>> {
    if !handle.is_valid() {
        return Err(Error::InvalidContext);
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let bound = handle.api().compress_bound(input.len());
    let mut output = allocate(bound)?;
    let written = compress_raw(handle, input, &mut output)?;
    output.truncate(written);
    Ok(output)
}

/// Compresses `input` into `output`, returning the written prefix.
pub(crate) fn compress_into<'out, B: NativeApi>(
    handle: &mut ContextHandle<B>,
    input: &[u8],
    output: &'out mut [u8],
) -> Result<&'out [u8]> {
    if !handle.is_valid() {
        return Err(Error::InvalidContext);
    }
    if input.is_empty() {
        return Ok(&output[..0]);
    }

    let written = compress_raw(handle, input, output)?;
    Ok(&output[..written])
}

fn compress_raw<B: NativeApi>(
    handle: &mut ContextHandle<B>,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize> {
    let (api, raw) = handle.parts();
    match Status::from_signed(api.compress(raw, output, input)) {
        Status::Written(n) => check_written(n, output.len()),
        Status::Failed(code) => Err(compression_failed(code, input.len(), output.len())),
    }
}

/// Decompresses `input`, sizing the output buffer with `strategy`.
pub(crate) fn decompress<B: NativeApi>(
    handle: &mut ContextHandle<B>,
    input: &[u8],
    strategy: DecompressStrategy,
) -> Result<Vec<u8>> {
    if !handle.is_valid() {
        return Err(Error::InvalidContext);
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }

    match strategy {
        DecompressStrategy::ExactSize => decompress_exact(handle, input),
        DecompressStrategy::BoundedGuess => decompress_guess(handle, input),
    }
}

fn decompress_exact<B: NativeApi>(handle: &ContextHandle<B>, input: &[u8]) -> Result<Vec<u8>> {
    let size = match Status::from_report(handle.api().decompressed_size(input)) {
        Status::Written(size) => size,
        Status::Failed(code) => {
            debug!("native size query failed with code {code}");
            return Err(Error::SizeQuery { code });
        }
    };
    if size == 0 {
        return Ok(Vec::new());
    }

    let mut output = allocate(size)?;
    let written = decompress_report(handle.api(), input, &mut output)?;
    output.truncate(written);
    Ok(output)
}

fn decompress_guess<B: NativeApi>(
    handle: &mut ContextHandle<B>,
    input: &[u8],
) -> Result<Vec<u8>> {
    let mut output = allocate(DecompressStrategy::guess_capacity(input.len()))?;
    let written = decompress_with_context(handle, input, &mut output)?;
    output.truncate(written);
    Ok(output)
}

/// Decompresses `input` into `output`, returning the written prefix.
///
/// The caller's buffer replaces the sized allocation, but `strategy` still
/// picks the native entry point.
pub(crate) fn decompress_into<'out, B: NativeApi>(
    handle: &mut ContextHandle<B>,
    input: &[u8],
    output: &'out mut [u8],
    strategy: DecompressStrategy,
) -> Result<&'out [u8]> {
    if !handle.is_valid() {
        return Err(Error::InvalidContext);
    }
    if input.is_empty() {
        return Ok(&output[..0]);
    }

    let written = match strategy {
        DecompressStrategy::ExactSize => decompress_report(handle.api(), input, output)?,
        DecompressStrategy::BoundedGuess => decompress_with_context(handle, input, output)?,
    };
    Ok(&output[..written])
}

fn decompress_with_context<B: NativeApi>(
    handle: &mut ContextHandle<B>,
    input: &[u8],
    output: &mut [u8],
) -> Result<usize> {
    let (api, raw) = handle.parts();
    match Status::from_signed(api.decompress_with_context(raw, output, input)) {
        Status::Written(n) => check_written(n, output.len()),
        Status::Failed(code) => Err(decompression_failed(code, input.len(), output.len())),
    }
}

fn decompress_report<B: NativeApi>(api: &B, input: &[u8], output: &mut [u8]) -> Result<usize> {
    match Status::from_report(api.decompress(output, input)) {
        Status::Written(n) => check_written(n, output.len()),
        Status::Failed(code) => Err(decompression_failed(code, input.len(), output.len())),
    }
}
