#![no_main]

use libfuzzer_sys::fuzz_target;
use openzl::{Config, Context};
mod common;
use common::*;

// Arbitrary bytes must produce an error or some output, never a crash.
fuzz_target!(|input: FuzzInput| {
    let config = Config::default().with_decompress_strategy(input.strategy.into());
    let mut ctx = Context::with_config(openzl::native::OpenZl, config).unwrap();

    if let Ok(decompressed) = ctx.decompress(&input.data) {
        assert!(ctx.compress(&decompressed).is_ok());
    }
    ctx.close();
    assert!(ctx.is_closed());
});
