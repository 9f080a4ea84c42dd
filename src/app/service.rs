//! Oven service, the hexagonal core.
//!
//! [`OvenService`] owns the phase engine and the shared context.  It is
//! **not** thread-safe: the [`Oven`](crate::oven::Oven) handle
//! wraps it in a single mutex so every operation sees the whole state
//! atomically.
//!
//! ```text
//!   Clock ──▶ ┌────────────────────────┐ ──▶ EventSink
//!             │      OvenService       │
//! commands ──▶│  FSM · Batch counters  │
//!             └────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::OvenConfig;
use crate::fsm::context::{OvenContext, OvenSnapshot};
use crate::fsm::states::build_phase_table;
use crate::fsm::{Fsm, Phase};

use super::commands::OvenCommand;
use super::events::OvenEvent;
use super::ports::{Clock, EventSink};

// ───────────────────────────────────────────────────────────────
// OvenService
// ───────────────────────────────────────────────────────────────

/// The oven service orchestrates all domain logic.
pub struct OvenService {
    fsm: Fsm,
    ctx: OvenContext,
}

impl OvenService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: OvenConfig) -> Self {
        Self {
            fsm: Fsm::new(build_phase_table(), Phase::Loading),
            ctx: OvenContext::new(config),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial phase (Loading).
    pub fn start(&mut self, sink: &mut (impl EventSink + ?Sized)) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&OvenEvent::Started(self.fsm.current_phase()));
        info!("OvenService started in {:?}", self.fsm.current_phase());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance the oven by one tick.
    ///
    /// When the tick unloads a finished batch, this blocks on `clock` for
    /// the unload duration before returning.  The caller holds the oven
    /// lock throughout, so no producer observes the oven mid-unload.
    pub fn tick(&mut self, clock: &(impl Clock + ?Sized), sink: &mut (impl EventSink + ?Sized)) {
        let prev = self.fsm.current_phase();

        self.fsm.tick(&mut self.ctx);
        let report = self.ctx.report;

        if let Some(ticks) = report.overheating {
            sink.emit(&OvenEvent::Overheating(ticks));
        }
        if report.burned {
            sink.emit(&OvenEvent::Burned);
        }
        if let Some(step) = report.bake_step {
            sink.emit(&OvenEvent::BakeProgressed(step));
        }
        if report.unloaded {
            sink.emit(&OvenEvent::Unloading);
            clock.sleep(self.ctx.config.unload_duration());
            sink.emit(&OvenEvent::Unloaded);
        }

        let now = self.fsm.current_phase();
        if now != prev {
            sink.emit(&OvenEvent::PhaseChanged { from: prev, to: now });
        }

        let every = u64::from(self.ctx.config.telemetry_interval_ticks);
        if every > 0 && self.fsm.tick_count() % every == 0 {
            sink.emit(&OvenEvent::Telemetry(self.snapshot()));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a producer command.  Returns `false` (and changes nothing)
    /// when the oven is in the wrong phase for it.
    pub fn handle_command(
        &mut self,
        cmd: OvenCommand,
        sink: &mut (impl EventSink + ?Sized),
    ) -> bool {
        let phase = self.fsm.current_phase();
        match cmd {
            OvenCommand::Load(amount) => {
                debug!("Load({}) requested in {:?}", amount, phase);
                if phase != Phase::Loading {
                    sink.emit(&OvenEvent::LoadRejected { amount });
                    return false;
                }
                let batch = &mut self.ctx.batch;
                batch.item_count = batch.item_count.saturating_add(amount);
                sink.emit(&OvenEvent::Loaded {
                    amount,
                    total: batch.item_count,
                });
                true
            }
            OvenCommand::Heat(amount) => {
                debug!("Heat({}) requested in {:?}", amount, phase);
                if phase != Phase::Heating {
                    sink.emit(&OvenEvent::HeatRejected { amount });
                    return false;
                }
                let batch = &mut self.ctx.batch;
                batch.temperature = batch.temperature.saturating_add(amount);
                sink.emit(&OvenEvent::Heated {
                    amount,
                    temperature: batch.temperature,
                });
                true
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.fsm.current_phase()
    }

    /// Copy of the full state.
    pub fn snapshot(&self) -> OvenSnapshot {
        let b = &self.ctx.batch;
        OvenSnapshot {
            phase: self.fsm.current_phase(),
            item_count: b.item_count,
            temperature: b.temperature,
            bake_progress: b.bake_progress,
            bake_timer: b.bake_timer,
            burn_timer: b.burn_timer,
            total_ticks: self.fsm.tick_count(),
        }
    }

    /// The live configuration.
    pub fn config(&self) -> &OvenConfig {
        &self.ctx.config
    }
}
