//! Transport-agnostic RPC subsystem.
//!
//! Compact length-prefixed RPC layer carrying postcard-encoded messages.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      RPC Stack                             │
//! │                                                            │
//! │  ┌───────────┐   ┌──────────┐   ┌───────────────────────┐  │
//! │  │ Transport │──▶│  Codec   │──▶│  Engine (dispatcher)  │  │
//! │  │ (trait)   │   │ (framing)│   │  → Oven               │  │
//! │  └───────────┘   └──────────┘   └───────────────────────┘  │
//! │       ▲                                    │               │
//! │       └──────────── response frames ◀──────┘               │
//! │                                                            │
//! │  server: TcpListener, thread per connection                │
//! │  client: blocking request/response (producers)             │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod codec;
pub mod engine;
pub mod messages;
pub mod server;
pub mod transport;
