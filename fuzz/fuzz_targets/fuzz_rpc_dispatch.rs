//! Fuzz target: `RpcEngine::feed_bytes`
//!
//! Arbitrary client bytes must never panic the engine or corrupt the
//! oven; every response it writes must decode.
//!
//! cargo fuzz run fuzz_rpc_dispatch

#![no_main]

use libfuzzer_sys::fuzz_target;
use breadoven::config::OvenConfig;
use breadoven::oven::Oven;
use breadoven::rpc::codec::FrameDecoder;
use breadoven::rpc::engine::RpcEngine;
use breadoven::rpc::messages::{self, Response};

fuzz_target!(|data: &[u8]| {
    let oven = Oven::with_system_adapters(OvenConfig::default());
    let mut engine = RpcEngine::new(oven.clone());

    let out = engine.feed_bytes(data).expect("responses always encode");
    let mut decoder = FrameDecoder::new();
    decoder.feed(&out, |payload| {
        assert!(messages::decode::<Response>(payload).is_ok());
    });

    let s = oven.snapshot();
    assert_eq!(s.total_ticks, 0);
    assert!(s.bake_progress == 0 && s.bake_timer == 0 && s.burn_timer == 0);
});
