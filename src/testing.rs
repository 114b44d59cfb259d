//! Recording stand-in for the native library, used by unit tests.
//!
//! Frames are `[len: u64 LE][payload]`, where the payload is either the input
//! verbatim or, for a run of one repeated byte, that single byte. The compress
//! bound leaves slack past the frame so truncation is observable.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::backend::{NativeApi, NativeHandle, Report};
use crate::Config;

const HEADER: usize = 8;
pub(crate) const BOUND_SLACK: usize = 32;
pub(crate) const CORRUPTED: i32 = 20;
pub(crate) const DST_TOO_SMALL: i32 = 70;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Calls {
    pub created: usize,
    pub freed: usize,
    pub bound: usize,
    pub compress: usize,
    pub size_query: usize,
    pub decompress: usize,
    pub decompress_with_context: usize,
}

impl Calls {
    /// Calls that move data across the boundary.
    pub(crate) fn transfers(&self) -> usize {
        self.bound
            + self.compress
            + self.size_query
            + self.decompress
            + self.decompress_with_context
    }
}

#[derive(Default)]
struct State {
    calls: Calls,
    next_id: usize,
    live: HashSet<usize>,
    last_config: Option<Config>,
    fail_create: bool,
    compress_error: Option<i64>,
    size_query_error: Option<i32>,
    decompress_error: Option<i32>,
    overreport: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FakeHandle(Option<usize>);

impl NativeHandle for FakeHandle {
    fn null() -> Self {
        FakeHandle(None)
    }

    fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeApi(Rc<RefCell<State>>);

impl FakeApi {
    pub(crate) fn calls(&self) -> Calls {
        self.0.borrow().calls
    }

    pub(crate) fn last_config(&self) -> Option<Config> {
        self.0.borrow().last_config
    }

    pub(crate) fn fail_create(&self) {
        self.0.borrow_mut().fail_create = true;
    }

    pub(crate) fn fail_compress(&self, result: i64) {
        self.0.borrow_mut().compress_error = Some(result);
    }

    pub(crate) fn fail_size_query(&self, code: i32) {
        self.0.borrow_mut().size_query_error = Some(code);
    }

    pub(crate) fn fail_decompress(&self, code: i32) {
        self.0.borrow_mut().decompress_error = Some(code);
    }

    /// Makes every transform report one byte more than the buffer holds.
    pub(crate) fn overreport(&self) {
        self.0.borrow_mut().overreport = true;
    }

    fn check_live(&self, handle: &FakeHandle) {
        let id = handle.0.expect("foreign call with a null handle");
        assert!(self.0.borrow().live.contains(&id), "use after free");
    }

    fn frame_len(src: &[u8]) -> Option<usize> {
        let header: [u8; HEADER] = src.get(..HEADER)?.try_into().ok()?;
        let len = u64::from_le_bytes(header) as usize;
        let payload = src.len() - HEADER;
        (payload == len || (payload == 1 && len > 0)).then_some(len)
    }

    fn unframe(&self, dst: &mut [u8], src: &[u8]) -> Result<usize, i32> {
        if let Some(code) = self.0.borrow().decompress_error {
            return Err(code);
        }
        let len = Self::frame_len(src).ok_or(CORRUPTED)?;
        if dst.len() < len {
            return Err(DST_TOO_SMALL);
        }
        let payload = &src[HEADER..];
        if payload.len() == len {
            dst[..len].copy_from_slice(payload);
        } else {
            dst[..len].fill(payload[0]);
        }
        if self.0.borrow().overreport {
            return Ok(dst.len() + 1);
        }
        Ok(len)
    }
}

impl NativeApi for FakeApi {
    type Handle = FakeHandle;

    fn create_context(&self, config: &Config) -> FakeHandle {
        let mut state = self.0.borrow_mut();
        state.calls.created += 1;
        state.last_config = Some(*config);
        if state.fail_create {
            return FakeHandle::null();
        }
        state.next_id += 1;
        let id = state.next_id;
        state.live.insert(id);
        FakeHandle(Some(id))
    }

    fn free_context(&self, handle: FakeHandle) {
        let id = handle.0.expect("free of a null handle");
        let mut state = self.0.borrow_mut();
        assert!(state.live.remove(&id), "double free");
        state.calls.freed += 1;
    }

    fn compress_bound(&self, src_size: usize) -> usize {
        self.0.borrow_mut().calls.bound += 1;
        src_size + HEADER + BOUND_SLACK
    }

    fn compress(&self, handle: &mut FakeHandle, dst: &mut [u8], src: &[u8]) -> i64 {
        self.check_live(handle);
        self.0.borrow_mut().calls.compress += 1;
        if let Some(result) = self.0.borrow().compress_error {
            return result;
        }
        let run = src.len() > 1 && src.iter().all(|&b| b == src[0]);
        let payload = if run { &src[..1] } else { src };
        let written = HEADER + payload.len();
        if dst.len() < written {
            return -i64::from(DST_TOO_SMALL);
        }
        dst[..HEADER].copy_from_slice(&(src.len() as u64).to_le_bytes());
        dst[HEADER..written].copy_from_slice(payload);
        if self.0.borrow().overreport {
            return dst.len() as i64 + 1;
        }
        written as i64
    }

    fn decompressed_size(&self, src: &[u8]) -> Report {
        self.0.borrow_mut().calls.size_query += 1;
        if let Some(code) = self.0.borrow().size_query_error {
            return Report::error(code);
        }
        match Self::frame_len(src) {
            Some(len) => Report::ok(len),
            None => Report::error(CORRUPTED),
        }
    }

    fn decompress(&self, dst: &mut [u8], src: &[u8]) -> Report {
        self.0.borrow_mut().calls.decompress += 1;
        match self.unframe(dst, src) {
            Ok(written) => Report::ok(written),
            Err(code) => Report::error(code),
        }
    }

    fn decompress_with_context(
        &self,
        handle: &mut FakeHandle,
        dst: &mut [u8],
        src: &[u8],
    ) -> i64 {
        self.check_live(handle);
        self.0.borrow_mut().calls.decompress_with_context += 1;
        match self.unframe(dst, src) {
            Ok(written) => written as i64,
            Err(code) => -i64::from(code),
        }
    }
}
