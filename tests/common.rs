//! A pure-Rust stand-in for the native library, built on the public traits.
//!
//! Frames are the input prefixed with its length as a little-endian `u64`.

use std::cell::Cell;
use std::rc::Rc;

use openzl::{Config, NativeApi, NativeHandle, Report};

pub const HEADER: usize = 8;
pub const SLACK: usize = 64;
pub const CORRUPTED: i32 = 20;

#[derive(Debug)]
pub struct Handle(Option<u32>);

impl NativeHandle for Handle {
    fn null() -> Self {
        Handle(None)
    }

    fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Default)]
pub struct Counters {
    pub live: Cell<usize>,
    pub created: Cell<usize>,
    pub native_calls: Cell<usize>,
}

/// Records how often each side of the boundary is crossed.
#[derive(Clone, Default)]
pub struct RecordingApi {
    pub counters: Rc<Counters>,
}

impl RecordingApi {
    fn touch(&self) {
        let calls = &self.counters.native_calls;
        calls.set(calls.get() + 1);
    }

    fn frame_len(src: &[u8]) -> Option<usize> {
        let header: [u8; HEADER] = src.get(..HEADER)?.try_into().ok()?;
        let len = u64::from_le_bytes(header) as usize;
        (src.len() - HEADER == len).then_some(len)
    }

    fn unframe(dst: &mut [u8], src: &[u8]) -> Result<usize, i32> {
        let len = Self::frame_len(src).ok_or(CORRUPTED)?;
        let out = dst.get_mut(..len).ok_or(CORRUPTED)?;
        out.copy_from_slice(&src[HEADER..]);
        Ok(len)
    }
}

impl NativeApi for RecordingApi {
    type Handle = Handle;

    fn create_context(&self, _config: &Config) -> Handle {
        let created = self.counters.created.get() + 1;
        self.counters.created.set(created);
        self.counters.live.set(self.counters.live.get() + 1);
        Handle(Some(created as u32))
    }

    fn free_context(&self, handle: Handle) {
        assert!(!handle.is_null());
        self.counters.live.set(self.counters.live.get() - 1);
    }

    fn compress_bound(&self, src_size: usize) -> usize {
        self.touch();
        src_size + HEADER + SLACK
    }

    fn compress(&self, handle: &mut Handle, dst: &mut [u8], src: &[u8]) -> i64 {
        assert!(!handle.is_null());
        self.touch();
        let written = HEADER + src.len();
        let Some(out) = dst.get_mut(..written) else {
            return -70;
        };
        out[..HEADER].copy_from_slice(&(src.len() as u64).to_le_bytes());
        out[HEADER..].copy_from_slice(src);
        written as i64
    }

    fn decompressed_size(&self, src: &[u8]) -> Report {
        self.touch();
        Self::frame_len(src).map_or(Report::error(CORRUPTED), Report::ok)
    }

    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Report {
        self.touch();
        match Self::unframe(dst, src) {
            Ok(n) => Report::ok(n),
            Err(code) => Report::error(code),
        }
    }

    fn decompress_with_context(&self, handle: &mut Handle, dst: &mut [u8], src: &[u8]) -> i64 {
        assert!(!handle.is_null());
        self.touch();
        match Self::unframe(dst, src) {
            Ok(n) => n as i64,
            Err(code) => -i64::from(code),
        }
    }
}
