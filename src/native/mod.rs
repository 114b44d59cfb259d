use cxx::UniquePtr;

use crate::backend::{NativeApi, NativeHandle, Report};
use crate::Config;

/// FFI bridge to the `OpenZL` C library.
///
/// The C++ side (`openzl_bridge.h`) owns a compression and a decompression
/// context per handle and translates `ZL_Report` into a shared struct.
#[cxx::bridge(namespace = "openzl_rs")]
mod ffi {
    /// Tagged native result, mirroring `ZL_Report`.
    struct NativeReport {
        is_error: bool,
        code: i32,
        value: usize,
    }

    unsafe extern "C++" {
        include!("openzl_bridge.h");

        /// Opaque handle owning one `ZL_CCtx` and one `ZL_DCtx`.
        type ZlContext;

        /// Returns a null pointer if any allocation or parameter fails.
        ///
        /// A parameter whose `has_*` flag is false keeps the library default.
        fn context_create(
            has_compression_level: bool,
            compression_level: i32,
            has_format_version: bool,
            format_version: u32,
        ) -> UniquePtr<ZlContext>;

        fn compress_bound(src_size: usize) -> usize;

        /// Returns the compressed size, or the negated error code.
        fn context_compress(ctx: Pin<&mut ZlContext>, dst: &mut [u8], src: &[u8]) -> i64;

        /// Returns the decompressed size, or the negated error code.
        fn context_decompress(ctx: Pin<&mut ZlContext>, dst: &mut [u8], src: &[u8]) -> i64;

        fn decompressed_size(src: &[u8]) -> NativeReport;

        fn decompress(dst: &mut [u8], src: &[u8]) -> NativeReport;
    }
}

// The native context carries no thread affinity; it only must not be shared.
unsafe impl Send for ffi::ZlContext {}

/// Owned pointer to a native `OpenZL` context.
pub type ZlHandle = UniquePtr<ffi::ZlContext>;

impl NativeHandle for ZlHandle {
    fn null() -> Self {
        UniquePtr::null()
    }

    fn is_null(&self) -> bool {
        UniquePtr::is_null(self)
    }
}

impl From<ffi::NativeReport> for Report {
    fn from(report: ffi::NativeReport) -> Self {
        if report.is_error {
            Report::error(report.code)
        } else {
            Report::ok(report.value)
        }
    }
}

/// The `OpenZL` library, linked at build time.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenZl;

/// Splits an optional creation parameter into the bridge's flag and value.
fn native_param<T: Default>(value: Option<T>) -> (bool, T) {
    match value {
        Some(value) => (true, value),
        None => (false, T::default()),
    }
}

impl NativeApi for OpenZl {
    type Handle = ZlHandle;

    fn create_context(&self, config: &Config) -> ZlHandle {
        let (has_level, level) = native_param(config.compression_level);
        let (has_version, version) = native_param(config.format_version);
        ffi::context_create(has_level, level, has_version, version)
    }

    fn free_context(&self, handle: ZlHandle) {
        drop(handle);
    }

    fn compress_bound(&self, src_size: usize) -> usize {
        ffi::compress_bound(src_size)
    }

    fn compress(&self, handle: &mut ZlHandle, dst: &mut [u8], src: &[u8]) -> i64 {
        match handle.as_mut() {
            Some(ctx) => ffi::context_compress(ctx, dst, src),
            None => -1,
        }
    }

    fn decompressed_size(&self, src: &[u8]) -> Report {
        ffi::decompressed_size(src).into()
    }

    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Report {
        ffi::decompress(dst, src).into()
    }

    fn decompress_with_context(&self, handle: &mut ZlHandle, dst: &mut [u8], src: &[u8]) -> i64 {
        match handle.as_mut() {
            Some(ctx) => ffi::context_decompress(ctx, dst, src),
            None => -1,
        }
    }
}
