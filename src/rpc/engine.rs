//! RPC engine: dispatches incoming frames to the oven.
//!
//! **Transport-decoupled**: the engine does not own a transport.  The
//! server feeds it raw bytes via [`feed_bytes`](RpcEngine::feed_bytes) and
//! writes back whatever response frames it returns.  One engine serves one
//! connection; all engines share the same [`Oven`] handle.

use log::{debug, warn};

use crate::error::RpcError;
use crate::oven::Oven;

use super::codec::{FrameDecoder, encode_frame};
use super::messages::{self, Call, ErrorCode, Reply, Request, Response, UNKNOWN_REQUEST_ID};

/// Per-connection RPC dispatcher.
pub struct RpcEngine {
    oven: Oven,
    decoder: FrameDecoder,
}

impl RpcEngine {
    pub fn new(oven: Oven) -> Self {
        Self {
            oven,
            decoder: FrameDecoder::new(),
        }
    }

    /// Feed raw bytes from the client and return the encoded response
    /// frames for every request completed by them (possibly none).
    pub fn feed_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>, RpcError> {
        let mut responses = Vec::new();
        let oven = &self.oven;
        self.decoder
            .feed(data, |payload| responses.push(dispatch(oven, payload)));

        let mut out = Vec::new();
        for response in responses {
            let payload = messages::encode(&response)?;
            encode_frame(&payload, &mut out)?;
        }
        Ok(out)
    }

    /// Decode one request payload and run it against the oven.
    pub fn dispatch(&self, payload: &[u8]) -> Response {
        dispatch(&self.oven, payload)
    }
}

fn dispatch(oven: &Oven, payload: &[u8]) -> Response {
    let request: Request = match messages::decode(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!("RPC: dropping malformed request ({} bytes): {}", payload.len(), e);
            return Response {
                id: UNKNOWN_REQUEST_ID,
                reply: Reply::Error(ErrorCode::Malformed),
            };
        }
    };

    debug!("RPC: #{} {:?}", request.id, request.call);
    let reply = match request.call {
        Call::GetOvenState => Reply::State(oven.get_state()),
        Call::Load(amount) => Reply::Accepted(oven.load(amount)),
        Call::Heat(amount) => Reply::Accepted(oven.heat(amount)),
        Call::GetSnapshot => Reply::Snapshot(oven.snapshot()),
    };

    Response {
        id: request.id,
        reply,
    }
}
