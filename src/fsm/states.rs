//! Concrete phase handler functions and table builder.
//!
//! ```text
//!  LOADING ──[item_count ≥ max_load]──▶ HEATING
//!     ▲                                    │
//!     ├───────────[batch baked: unload]────┤
//!     └──[item_count < max_load, e.g. after a burn]
//! ```
//!
//! While heating, every tick classifies the temperature:
//!
//! | band               | bake timer | burn timer | threshold action        |
//! |--------------------|------------|------------|-------------------------|
//! | `< min_temp`       | reset      | reset      | none                    |
//! | `> max_temp`       | reset      | +1         | burn at `burn_limit`    |
//! | otherwise          | +1         | reset      | bake step at `bake_step`|

use super::context::OvenContext;
use super::{Phase, PhaseDescriptor};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the phase table.  Called once at startup.
pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        // Index 0: Loading
        PhaseDescriptor {
            name: "Loading",
            on_enter: Some(loading_enter),
            on_update: loading_update,
        },
        // Index 1: Heating
        PhaseDescriptor {
            name: "Heating",
            on_enter: Some(heating_enter),
            on_update: heating_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Temperature classification
// ═══════════════════════════════════════════════════════════════════════════

/// Where the oven temperature sits relative to the baking band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBand {
    Cold,
    InRange,
    Overheated,
}

/// Classify `temperature`.  Both band edges count as in range.
pub fn classify(temperature: i32, min_temp: i32, max_temp: i32) -> TempBand {
    if temperature < min_temp {
        TempBand::Cold
    } else if temperature > max_temp {
        TempBand::Overheated
    } else {
        TempBand::InRange
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOADING
// ═══════════════════════════════════════════════════════════════════════════

fn loading_enter(ctx: &mut OvenContext) {
    info!(
        "LOADING: accepting items ({} / {})",
        ctx.batch.item_count, ctx.config.max_load
    );
}

fn loading_update(ctx: &mut OvenContext) -> Option<Phase> {
    if ctx.is_full() {
        return Some(Phase::Heating);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  HEATING
// ═══════════════════════════════════════════════════════════════════════════

fn heating_enter(ctx: &mut OvenContext) {
    info!(
        "HEATING: {} items in, band {}..={}",
        ctx.batch.item_count, ctx.config.min_temp, ctx.config.max_temp
    );
}

fn heating_update(ctx: &mut OvenContext) -> Option<Phase> {
    // A burnt batch leaves the oven empty; go back to loading.
    if !ctx.is_full() {
        return Some(Phase::Loading);
    }

    if ctx.is_baked() {
        info!("HEATING: batch baked, unloading");
        ctx.batch.reset();
        ctx.report.unloaded = true;
        return Some(Phase::Loading);
    }

    let band = classify(
        ctx.batch.temperature,
        ctx.config.min_temp,
        ctx.config.max_temp,
    );

    match band {
        TempBand::Cold => {
            ctx.batch.bake_timer = 0;
            ctx.batch.burn_timer = 0;
        }
        TempBand::Overheated => {
            ctx.batch.bake_timer = 0;
            ctx.batch.burn_timer += 1;
            ctx.report.overheating = Some(ctx.batch.burn_timer);
            warn!(
                "HEATING: {}C is over {}C for {} tick(s)",
                ctx.batch.temperature, ctx.config.max_temp, ctx.batch.burn_timer
            );
            if ctx.batch.burn_timer >= ctx.config.burn_limit_ticks {
                warn!("HEATING: batch burnt, discarding");
                ctx.batch.discard_burnt();
                ctx.report.burned = true;
            }
        }
        TempBand::InRange => {
            ctx.batch.burn_timer = 0;
            ctx.batch.bake_timer += 1;
            if ctx.batch.bake_timer >= ctx.config.bake_step_ticks {
                ctx.batch.bake_progress += 1;
                ctx.batch.bake_timer = 0;
                ctx.report.bake_step = Some(ctx.batch.bake_progress);
                info!("HEATING: baking progress {}%", ctx.progress_percent());
            }
        }
    }

    None
}
