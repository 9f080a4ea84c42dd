//! Outbound application events.
//!
//! The [`OvenService`](super::service::OvenService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::Phase;
use crate::fsm::context::OvenSnapshot;

/// Structured events emitted by the oven core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OvenEvent {
    /// The service has started (carries initial phase).
    Started(Phase),

    /// The oven moved between phases.
    PhaseChanged { from: Phase, to: Phase },

    /// Items were added; `total` is the new item count.
    Loaded { amount: i32, total: i32 },

    /// A load arrived while the oven was heating.
    LoadRejected { amount: i32 },

    /// Temperature was adjusted; `temperature` is the new value.
    Heated { amount: i32, temperature: i32 },

    /// A heat adjustment arrived while the oven was loading.
    HeatRejected { amount: i32 },

    /// One bake step completed; carries the new progress.
    BakeProgressed(u8),

    /// Temperature above the band; carries the burn timer.
    Overheating(u32),

    /// The batch burnt and was discarded.
    Burned,

    /// A baked batch is being pulled out; the oven is locked.
    Unloading,

    /// The oven is empty again.
    Unloaded,

    /// Periodic snapshot.
    Telemetry(OvenSnapshot),
}
