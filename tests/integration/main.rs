//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  Everything runs on the host; the RPC tests
//! bind loopback sockets on ephemeral ports.

mod mock_clock;
mod mock_transport;
mod oven_tests;
mod rpc_tests;
