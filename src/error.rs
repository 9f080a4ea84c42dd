//! Unified error types for the oven service and its clients.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! server and producer loops' error handling uniform.  Policy rejections
//! (`Load` while heating, `Heat` while loading) are *not* errors; they are
//! reported as `false` by the oven.

use core::fmt;

use crate::app::ports::ConfigError;
use crate::rpc::messages::ErrorCode;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the oven core funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// The RPC layer failed (framing, encoding, protocol).
    Rpc(RpcError),
    /// The underlying socket failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Rpc(e) => write!(f, "rpc: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// RPC errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcError {
    /// Peer closed the connection.
    Disconnected,
    /// Outgoing payload does not fit in one frame.
    FrameTooLarge,
    /// Message could not be serialised.
    Encode,
    /// Payload could not be deserialised.
    Decode,
    /// Reply id or variant does not match the request.
    UnexpectedReply,
    /// The server answered with an error code.
    Remote(ErrorCode),
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "peer disconnected"),
            Self::FrameTooLarge => write!(f, "frame too large"),
            Self::Encode => write!(f, "encode failed"),
            Self::Decode => write!(f, "decode failed"),
            Self::UnexpectedReply => write!(f, "unexpected reply"),
            Self::Remote(code) => write!(f, "server error: {code:?}"),
        }
    }
}

impl std::error::Error for RpcError {}

impl From<RpcError> for Error {
    fn from(e: RpcError) -> Self {
        Self::Rpc(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
