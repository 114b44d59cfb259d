use std::mem;

use log::debug;

use crate::backend::{NativeApi, NativeHandle};
use crate::{Config, Error, Result};

/// Single owner of one native context handle.
///
/// The handle is released exactly once: either by [`ContextHandle::release`]
/// or on drop, whichever comes first.
pub(crate) struct ContextHandle<B: NativeApi> {
    api: B,
    raw: B::Handle,
}

impl<B: NativeApi> ContextHandle<B> {
    /// Allocates a native context. A null handle is reported, not retried.
    pub(crate) fn create(api: B, config: &Config) -> Result<Self> {
        let raw = api.create_context(config);
        if raw.is_null() {
            debug!("native context allocation failed ({config:?})");
            return Err(Error::HandleCreation);
        }
        debug!("created native context ({config:?})");
        Ok(Self { api, raw })
    }

    /// Frees the native context. Releasing a null handle is a no-op.
    pub(crate) fn release(&mut self) {
        if self.raw.is_null() {
            return;
        }
        let raw = mem::replace(&mut self.raw, B::Handle::null());
        self.api.free_context(raw);
        debug!("released native context");
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.raw.is_null()
    }

    /// The native API together with the handle, for a single foreign call.
    pub(crate) fn parts(&mut self) -> (&B, &mut B::Handle) {
        (&self.api, &mut self.raw)
    }

    pub(crate) fn api(&self) -> &B {
        &self.api
    }
}

impl<B: NativeApi> Drop for ContextHandle<B> {
    fn drop(&mut self) {
        self.release();
    }
}
