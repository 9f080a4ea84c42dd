//! Shared mutable context threaded through every phase handler.
//!
//! `OvenContext` is the single struct that phase handlers read from and
//! write to.  It contains the batch counters, what the current tick did,
//! timing information, and configuration.

use serde::{Deserialize, Serialize};

use crate::config::OvenConfig;

use super::Phase;

// ---------------------------------------------------------------------------
// Batch counters (written by Load/Heat and by phase handlers)
// ---------------------------------------------------------------------------

/// Counters for the batch currently in the oven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Batch {
    /// Accumulated load units.
    pub item_count: i32,
    /// Accumulated heat adjustments.
    pub temperature: i32,
    /// Completed bake steps (each one is 10% of the batch).
    pub bake_progress: u8,
    /// Consecutive in-range ticks since the last bake step.
    pub bake_timer: u32,
    /// Consecutive over-range ticks.
    pub burn_timer: u32,
}

impl Batch {
    /// Empty oven, cold, nothing baked.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Throw a burnt batch away.  The bake timer was already cleared by
    /// the over-range tick that got us here.
    pub fn discard_burnt(&mut self) {
        self.item_count = 0;
        self.burn_timer = 0;
        self.bake_progress = 0;
        self.temperature = 0;
    }
}

// ---------------------------------------------------------------------------
// Tick report (written by phase handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// What happened during the last tick, beyond the phase change itself.
/// The service turns these into [`OvenEvent`](crate::app::events::OvenEvent)s
/// and performs the unload pause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A bake step completed; carries the new progress.
    pub bake_step: Option<u8>,
    /// The oven is over range; carries the burn timer.
    pub overheating: Option<u32>,
    /// The batch burnt and was discarded.
    pub burned: bool,
    /// A finished batch was unloaded; the service must hold the oven
    /// for the unload duration.
    pub unloaded: bool,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A point-in-time copy of the whole oven state, taken under the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvenSnapshot {
    pub phase: Phase,
    pub item_count: i32,
    pub temperature: i32,
    pub bake_progress: u8,
    pub bake_timer: u32,
    pub burn_timer: u32,
    pub total_ticks: u64,
}

// ---------------------------------------------------------------------------
// OvenContext
// ---------------------------------------------------------------------------

/// The shared context passed to every phase handler function.
pub struct OvenContext {
    // -- State --
    pub batch: Batch,

    // -- Outputs --
    /// Cleared at the start of every tick.
    pub report: TickReport,

    // -- Configuration --
    pub config: OvenConfig,
}

impl OvenContext {
    pub fn new(config: OvenConfig) -> Self {
        Self {
            batch: Batch::default(),
            report: TickReport::default(),
            config,
        }
    }

    /// True once enough items are in the oven to start heating.
    pub fn is_full(&self) -> bool {
        self.batch.item_count >= self.config.max_load
    }

    /// True once every bake step of the batch has completed.
    pub fn is_baked(&self) -> bool {
        self.batch.bake_progress >= self.config.bake_steps
    }

    /// Batch progress in percent.
    pub fn progress_percent(&self) -> u32 {
        u32::from(self.batch.bake_progress) * 100 / u32::from(self.config.bake_steps.max(1))
    }
}
