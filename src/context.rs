use crate::backend::NativeApi;
use crate::handle::ContextHandle;
use crate::{marshal, CodecToSlice, Config, DecompressStrategy, Error, Result};

/// A compression/decompression session with the native library.
///
/// A context is either live or closed. [`Context::close`] (or drop) frees the
/// native context; after that every operation fails with
/// [`Error::ClosedContext`] without reaching the native library.
///
/// Reusing one context for many calls avoids the cost of allocating native
/// state each time. A context is not meant to be shared: all operations take
/// `&mut self`, so each thread works with its own context.
///
/// # Example
///
/// ```no_run
/// # #[cfg(feature = "native")]
/// # fn main() -> openzl::Result<()> {
/// let mut ctx = openzl::Context::open()?;
///
/// let data = b"Hello, World!";
/// let compressed = ctx.compress(data)?;
/// let decompressed = ctx.decompress(&compressed)?;
/// assert_eq!(decompressed, data);
///
/// ctx.close();
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "native"))]
/// # fn main() {}
/// ```
pub struct Context<B: NativeApi> {
    handle: ContextHandle<B>,
    strategy: DecompressStrategy,
}

impl<B: NativeApi> Context<B> {
    /// Opens a context over `api` with the default [`Config`].
    pub fn open_with(api: B) -> Result<Self> {
        Self::with_config(api, Config::default())
    }

    /// Opens a context over `api`, applying `config` at creation.
    pub fn with_config(api: B, config: Config) -> Result<Self> {
        Ok(Self {
            handle: ContextHandle::create(api, &config)?,
            strategy: config.decompress_strategy,
        })
    }

    /// Compresses `data`. Empty input yields empty output.
    pub fn compress(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.ensure_live()?;
        marshal::compress(&mut self.handle, data)
    }

    /// Decompresses `data` produced by a compatible compressor.
    pub fn decompress(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        self.ensure_live()?;
        marshal::decompress(&mut self.handle, data, self.strategy)
    }

    /// Frees the native context. Closing more than once is a no-op.
    pub fn close(&mut self) {
        self.handle.release();
    }

    pub fn is_closed(&self) -> bool {
        !self.handle.is_valid()
    }

    pub fn decompress_strategy(&self) -> DecompressStrategy {
        self.strategy
    }

    fn ensure_live(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::ClosedContext);
        }
        Ok(())
    }
}

#[cfg(feature = "native")]
impl Context<crate::native::OpenZl> {
    /// Opens a context over the `OpenZL` library with its default parameters.
    pub fn open() -> Result<Self> {
        Self::open_with(crate::native::OpenZl)
    }
}

impl<B: NativeApi> CodecToSlice for Context<B> {
    type Error = Error;

    fn compress_to_slice<'out>(
        &mut self,
        input: &[u8],
        output: &'out mut [u8],
    ) -> Result<&'out [u8]> {
        self.ensure_live()?;
        marshal::compress_into(&mut self.handle, input, output)
    }

    fn decompress_to_slice<'out>(
        &mut self,
        input: &[u8],
        output: &'out mut [u8],
    ) -> Result<&'out [u8]> {
        self.ensure_live()?;
        marshal::decompress_into(&mut self.handle, input, output, self.strategy)
    }
}

impl<B: NativeApi> std::fmt::Debug for Context<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("closed", &self.is_closed())
            .field("strategy", &self.strategy)
            .finish()
    }
}
