//! Inbound commands to the oven service.
//!
//! These represent mutations requested by the outside world (RPC
//! producers) that the [`OvenService`](super::service::OvenService)
//! accepts or rejects depending on the current phase.

/// Mutations that producers can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenCommand {
    /// Add items.  Only accepted while loading.
    Load(i32),

    /// Adjust the temperature (may be negative).  Only accepted while heating.
    Heat(i32),
}
