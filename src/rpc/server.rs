//! TCP RPC server.
//!
//! One listener, one thread per accepted connection, one [`RpcEngine`]
//! per thread.  A failing connection only ends itself; the shared oven is
//! untouched by transport errors.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::thread;

use log::{info, warn};

use crate::adapters::tcp_transport::TcpTransport;
use crate::error::{Error, Result};
use crate::oven::Oven;

use super::engine::RpcEngine;
use super::transport::Transport;

/// Read buffer per connection.
const READ_BUF_SIZE: usize = 512;

pub struct RpcServer {
    listener: TcpListener,
    oven: Oven,
}

impl RpcServer {
    pub fn bind(addr: impl ToSocketAddrs, oven: Oven) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        info!("RPC server listening on {}", listener.local_addr()?);
        Ok(Self { listener, oven })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever.
    pub fn serve(self) -> io::Result<()> {
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!("RPC accept failed: {}", e);
                    continue;
                }
            };

            let mut transport = match TcpTransport::from_stream(stream) {
                Ok(t) => t,
                Err(e) => {
                    warn!("RPC connection setup failed: {}", e);
                    continue;
                }
            };
            let peer = transport.peer();
            let mut engine = RpcEngine::new(self.oven.clone());

            let spawned = thread::Builder::new()
                .name(format!("rpc-{}", peer.map_or_else(|| "?".into(), |p| p.to_string())))
                .spawn(move || {
                    info!("RPC client {:?} connected", peer);
                    match serve_connection(&mut transport, &mut engine) {
                        Ok(()) => info!("RPC client {:?} disconnected", peer),
                        Err(e) => warn!("RPC client {:?} dropped: {}", peer, e),
                    }
                });
            if let Err(e) = spawned {
                warn!("RPC worker spawn failed: {}", e);
            }
        }
        Ok(())
    }
}

/// Pump one connection until the peer closes or the transport fails.
pub fn serve_connection<T: Transport>(transport: &mut T, engine: &mut RpcEngine) -> Result<()> {
    let mut buf = [0u8; READ_BUF_SIZE];
    loop {
        let n = transport.read(&mut buf).map_err(Into::<Error>::into)?;
        if n == 0 {
            return Ok(());
        }
        let out = engine.feed_bytes(&buf[..n])?;
        if !out.is_empty() {
            transport.write(&out).map_err(Into::<Error>::into)?;
            transport.flush().map_err(Into::<Error>::into)?;
        }
    }
}
