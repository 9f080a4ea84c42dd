//! In-memory transport wired straight into an [`RpcEngine`].
//!
//! Writes are dispatched synchronously; the response bytes are queued for
//! the next reads.  An empty queue reads as a closed peer.  `fail_after`
//! injects a transport error after that many writes.

use std::collections::VecDeque;
use std::io;

use breadoven::oven::Oven;
use breadoven::rpc::engine::RpcEngine;
use breadoven::rpc::transport::Transport;

pub struct LoopbackTransport {
    engine: RpcEngine,
    inbound: VecDeque<u8>,
    writes: usize,
    fail_after: Option<usize>,
}

impl LoopbackTransport {
    pub fn new(oven: Oven) -> Self {
        Self {
            engine: RpcEngine::new(oven),
            inbound: VecDeque::new(),
            writes: 0,
            fail_after: None,
        }
    }

    pub fn failing_after(oven: Oven, writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::new(oven)
        }
    }
}

impl Transport for LoopbackTransport {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        let n = buf.len().min(self.inbound.len());
        for (slot, byte) in buf.iter_mut().zip(self.inbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, io::Error> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected failure"));
        }
        self.writes += 1;
        let out = self
            .engine
            .feed_bytes(data)
            .map_err(|e| io::Error::other(e.to_string()))?;
        self.inbound.extend(out);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}
