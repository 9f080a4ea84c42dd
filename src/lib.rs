//! Bread oven simulator library.
//!
//! The oven core is pure logic (`fsm`, `app`) driven through ports; the
//! `oven` module wraps it in a lock shared by the ticker thread and the
//! RPC server, and `producer` holds the loader/heater clients.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod oven;
pub mod producer;
pub mod rpc;
