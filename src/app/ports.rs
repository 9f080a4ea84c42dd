//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ OvenService (domain)
//! ```
//!
//! Driven adapters (clock, event sinks, config storage) implement these
//! traits.  The [`OvenService`](super::service::OvenService) consumes them via
//! generics, so the domain core never sleeps, logs to a concrete target, or
//! touches the filesystem directly.

use std::time::Duration;

use crate::config::AppConfig;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → time)
// ───────────────────────────────────────────────────────────────

/// Blocking time source used for the unload pause and producer pacing.
pub trait Clock: Send + Sync {
    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`OvenEvent`](super::events::OvenEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink: Send {
    fn emit(&mut self, event: &super::events::OvenEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ← persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations MUST validate values before returning them and reject
/// invalid ranges with [`ConfigError::ValidationFailed`] rather than
/// silently clamping.
pub trait ConfigPort {
    /// Load configuration.  Returns [`AppConfig::default()`] if no stored
    /// config exists.
    fn load(&self) -> Result<AppConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    Io(std::io::Error),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted(msg) => write!(f, "config corrupted: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}
