//! Blocking RPC client.
//!
//! Sends one request at a time and waits for the matching response.
//! Request ids increase monotonically (skipping 0, which the server
//! reserves for replies to unreadable requests).

use std::collections::VecDeque;
use std::net::ToSocketAddrs;

use crate::adapters::tcp_transport::TcpTransport;
use crate::error::{Error, Result, RpcError};
use crate::fsm::Phase;
use crate::fsm::context::OvenSnapshot;

use super::codec::{FrameDecoder, encode_frame};
use super::messages::{self, Call, Reply, Request, Response, UNKNOWN_REQUEST_ID};
use super::transport::Transport;

pub struct OvenClient<T: Transport> {
    transport: T,
    decoder: FrameDecoder,
    /// Complete frames received but not yet consumed.
    pending: VecDeque<Vec<u8>>,
    next_id: u32,
}

impl OvenClient<TcpTransport> {
    /// Connect to an oven server over TCP.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        Ok(Self::new(TcpTransport::connect(addr)?))
    }
}

impl<T: Transport> OvenClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            next_id: 1,
        }
    }

    pub fn get_oven_state(&mut self) -> Result<Phase> {
        match self.call(Call::GetOvenState)? {
            Reply::State(phase) => Ok(phase),
            _ => Err(RpcError::UnexpectedReply.into()),
        }
    }

    pub fn load(&mut self, amount: i32) -> Result<bool> {
        self.expect_accepted(Call::Load(amount))
    }

    pub fn heat(&mut self, amount: i32) -> Result<bool> {
        self.expect_accepted(Call::Heat(amount))
    }

    pub fn snapshot(&mut self) -> Result<OvenSnapshot> {
        match self.call(Call::GetSnapshot)? {
            Reply::Snapshot(s) => Ok(s),
            _ => Err(RpcError::UnexpectedReply.into()),
        }
    }

    fn expect_accepted(&mut self, call: Call) -> Result<bool> {
        match self.call(call)? {
            Reply::Accepted(ok) => Ok(ok),
            _ => Err(RpcError::UnexpectedReply.into()),
        }
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        if self.next_id == UNKNOWN_REQUEST_ID {
            self.next_id = 1;
        }
        id
    }

    fn call(&mut self, call: Call) -> Result<Reply> {
        let id = self.alloc_id();
        let payload = messages::encode(&Request { id, call })?;
        let mut frame = Vec::new();
        encode_frame(&payload, &mut frame)?;
        self.transport.write(&frame).map_err(Into::<Error>::into)?;
        self.transport.flush().map_err(Into::<Error>::into)?;

        let raw = self.next_frame()?;
        let response: Response = messages::decode(&raw)?;
        if let Reply::Error(code) = response.reply {
            return Err(RpcError::Remote(code).into());
        }
        if response.id != id {
            return Err(RpcError::UnexpectedReply.into());
        }
        Ok(response.reply)
    }

    fn next_frame(&mut self) -> Result<Vec<u8>> {
        let mut buf = [0u8; 512];
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Ok(frame);
            }
            let n = self.transport.read(&mut buf).map_err(Into::<Error>::into)?;
            if n == 0 {
                return Err(RpcError::Disconnected.into());
            }
            let pending = &mut self.pending;
            self.decoder.feed(&buf[..n], |f| pending.push_back(f.to_vec()));
        }
    }
}
