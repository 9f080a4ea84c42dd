//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the oven: phase
//! orchestration, producer command handling, and event reporting.  All
//! interaction with time, logging targets, and storage happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without sleeping or sockets.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
