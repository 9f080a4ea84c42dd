//! RPC message schema.
//!
//! Every frame payload is one postcard-encoded [`Request`] (client →
//! server) or [`Response`] (server → client).  The `id` ties a response to
//! its request; the server echoes it unchanged.

use serde::{Deserialize, Serialize};

use crate::error::RpcError;
use crate::fsm::Phase;
use crate::fsm::context::OvenSnapshot;

/// Client → server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: u32,
    pub call: Call,
}

/// The operations the oven exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    GetOvenState,
    Load(i32),
    Heat(i32),
    GetSnapshot,
}

/// Server → client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: u32,
    pub reply: Reply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    State(Phase),
    Accepted(bool),
    Snapshot(OvenSnapshot),
    Error(ErrorCode),
}

/// Protocol-level failures reported back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The request payload could not be decoded.
    Malformed,
}

/// Id used for responses to requests whose id could not be read.
pub const UNKNOWN_REQUEST_ID: u32 = 0;

pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>, RpcError> {
    postcard::to_allocvec(msg).map_err(|_| RpcError::Encode)
}

pub fn decode<'a, T: Deserialize<'a>>(payload: &'a [u8]) -> Result<T, RpcError> {
    postcard::from_bytes(payload).map_err(|_| RpcError::Decode)
}
