//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured oven events to the `log`
//! facade.  The binary routes that into `tracing-subscriber`.

use log::{debug, info, warn};

use crate::app::events::OvenEvent;
use crate::app::ports::EventSink;
use crate::fsm::context::OvenSnapshot;

/// Adapter that logs every [`OvenEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// One-line rendering of a telemetry snapshot.
fn telemetry_line(t: &OvenSnapshot) -> String {
    format!(
        "TELEM | phase={:?} | items={} | T={} | bake={} bake_timer={} | burn={} | tick={}",
        t.phase,
        t.item_count,
        t.temperature,
        t.bake_progress,
        t.bake_timer,
        t.burn_timer,
        t.total_ticks,
    )
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &OvenEvent) {
        match event {
            OvenEvent::Telemetry(t) => info!("{}", telemetry_line(t)),
            OvenEvent::Started(phase) => info!("START | initial_phase={:?}", phase),
            OvenEvent::PhaseChanged { from, to } => info!("PHASE | {:?} -> {:?}", from, to),
            OvenEvent::Loaded { amount, total } => {
                info!("LOAD  | +{} accepted, {} items in oven", amount, total);
            }
            OvenEvent::LoadRejected { amount } => {
                info!("LOAD  | {} denied, oven is not loading", amount);
            }
            OvenEvent::Heated {
                amount,
                temperature,
            } => info!("HEAT  | {:+} accepted, now {}C", amount, temperature),
            OvenEvent::HeatRejected { amount } => {
                info!("HEAT  | {:+} denied, oven is not heating", amount);
            }
            OvenEvent::BakeProgressed(step) => debug!("BAKE  | step {}", step),
            OvenEvent::Overheating(ticks) => warn!("BURN  | overheating for {} tick(s)", ticks),
            OvenEvent::Burned => warn!("BURN  | batch burnt, restarting"),
            OvenEvent::Unloading => info!("UNLOAD| batch baked, pulling it out"),
            OvenEvent::Unloaded => info!("UNLOAD| oven empty"),
        }
    }
}
