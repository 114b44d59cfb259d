use crate::Config;

/// Tagged result of the structured native API, mirroring `ZL_Report`.
///
/// A report either carries a value (a size) or an error code, never both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report {
    is_error: bool,
    code: i32,
    value: usize,
}

impl Report {
    /// A successful report carrying `value`.
    pub fn ok(value: usize) -> Self {
        Self {
            is_error: false,
            code: 0,
            value,
        }
    }

    /// A failed report carrying the native error `code`.
    pub fn error(code: i32) -> Self {
        Self {
            is_error: true,
            code,
            value: 0,
        }
    }

    /// Whether the native call failed.
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Native error code; `0` for successful reports.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Value of a successful report; `0` for failed reports.
    pub fn value(&self) -> usize {
        self.value
    }
}

/// An opaque, nullable handle to a native context.
pub trait NativeHandle {
    /// The null handle. Releasing it must be a no-op.
    fn null() -> Self;

    fn is_null(&self) -> bool;
}

/// The C-style function surface of the native compression library.
///
/// Each method maps to exactly one native entry point. Implementations pass
/// the slices straight through to the library; sizing, status interpretation
/// and truncation are handled by the caller.
pub trait NativeApi {
    /// Owned handle to one native context.
    type Handle: NativeHandle;

    /// Allocates a context. Returns a null handle on failure.
    fn create_context(&self, config: &Config) -> Self::Handle;

    /// Frees a context. Only ever called with a non-null handle.
    fn free_context(&self, handle: Self::Handle);

    /// Upper bound of the compressed size of any `src_size` byte input.
    fn compress_bound(&self, src_size: usize) -> usize;

    /// Compresses `src` into `dst`.
    ///
    /// Returns the number of bytes written, or a negated error code.
    fn compress(&self, handle: &mut Self::Handle, dst: &mut [u8], src: &[u8]) -> i64;

    /// Reads the decompressed size recorded in the compressed frame `src`.
    fn decompressed_size(&self, src: &[u8]) -> Report;

    /// Decompresses `src` into `dst` without a context.
    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Report;

    /// Decompresses `src` into `dst` using the context's decompressor.
    ///
    /// Returns the number of bytes written, or a negated error code.
    fn decompress_with_context(&self, handle: &mut Self::Handle, dst: &mut [u8], src: &[u8])
        -> i64;
}
