#![no_main]

use libfuzzer_sys::fuzz_target;
use openzl::{Config, Context, Error};
mod common;
use common::*;

fuzz_target!(|input: FuzzInput| {
    let config = Config::default().with_decompress_strategy(input.strategy.into());
    let mut ctx = Context::with_config(openzl::native::OpenZl, config).unwrap();

    let compressed = ctx.compress(&input.data).unwrap();
    match ctx.decompress(&compressed) {
        Ok(decompressed) => assert_eq!(input.data, decompressed, "Decompressed output mismatches"),
        // The guessed buffer may be too small for highly compressible input.
        Err(Error::Decompression { .. }) if input.strategy == Strategy::BoundedGuess => {}
        Err(err) => panic!("roundtrip failed: {err}"),
    }
});
