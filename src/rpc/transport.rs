//! Transport abstraction: any byte-oriented, blocking channel.
//!
//! Concrete implementation: [`TcpTransport`](crate::adapters::tcp_transport::TcpTransport).
//! The server and client are generic over `Transport`, so adding a new
//! transport requires zero changes to the RPC logic.

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug + Into<crate::error::Error>;

    /// Read up to `buf.len()` bytes into `buf`, blocking until at least
    /// one byte is available.  Returns 0 when the peer has closed.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write all of `data` to the transport.
    /// Returns the number of bytes written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
