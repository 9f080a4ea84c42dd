//! TCP transport adapter.
//!
//! Implements [`Transport`] over a blocking `std::net::TcpStream`.  One
//! instance wraps one connection; the server creates one per accepted
//! client and the producers create one per (re)connect.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use log::debug;

use crate::rpc::transport::Transport;

pub struct TcpTransport {
    stream: TcpStream,
    peer: Option<SocketAddr>,
}

impl TcpTransport {
    /// Connect to an oven server.
    pub fn connect(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        Self::from_stream(stream)
    }

    /// Wrap an accepted connection.
    pub fn from_stream(stream: TcpStream) -> io::Result<Self> {
        // Requests are tiny; don't let Nagle hold them back.
        stream.set_nodelay(true)?;
        let peer = stream.peer_addr().ok();
        debug!("TcpTransport: connected to {:?}", peer);
        Ok(Self { stream, peer })
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }
}

impl Transport for TcpTransport {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        loop {
            match self.stream.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                other => return other,
            }
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, io::Error> {
        self.stream.write_all(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        self.stream.flush()
    }
}
