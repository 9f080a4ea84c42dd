//! Function-pointer finite state machine engine.
//!
//! Classic table-driven FSM pattern:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  PhaseTable                                      │
//! │  ┌─────────┬───────────┬───────────────────────┐ │
//! │  │ Phase   │ on_enter  │ on_update             │ │
//! │  ├─────────┼───────────┼───────────────────────┤ │
//! │  │ Loading │ fn(ctx)   │ fn(ctx)->Option<>     │ │
//! │  │ Heating │ fn(ctx)   │ fn(ctx)->Option<>     │ │
//! │  └─────────┴───────────┴───────────────────────┘ │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** phase.
//! If it returns `Some(next)`, the engine runs `on_enter` for the next
//! phase, updates the current pointer, and lets the new phase's
//! `on_update` run within the same tick.  Chaining is bounded by the
//! number of phases, so a tick always terminates.

pub mod context;
pub mod states;

use context::{OvenContext, TickReport};
use log::info;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Coarse lifecycle phase of the oven.
/// Must stay in sync with the table built in [`states::build_phase_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    Loading = 0,
    Heating = 1,
}

impl Phase {
    /// Total number of phases, used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert an index back to `Phase`.  Out-of-range indices map to
    /// `Loading` (the safe phase: nothing is heated).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            1 => Self::Heating,
            0 => Self::Loading,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::Loading
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.  Runs exactly once per transition.
pub type PhaseActionFn = fn(&mut OvenContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type PhaseUpdateFn = fn(&mut OvenContext) -> Option<Phase>;

/// Static descriptor for a single phase.
pub struct PhaseDescriptor {
    pub name: &'static str,
    pub on_enter: Option<PhaseActionFn>,
    pub on_update: PhaseUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The oven's phase engine.
///
/// Owns the phase table and the current pointer.  All counters live in the
/// [`OvenContext`] threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `Phase as usize`.
    table: [PhaseDescriptor; Phase::COUNT],
    /// Index of the currently active phase.
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
}

impl Fsm {
    /// Construct a new FSM with the given phase table, starting in `initial`.
    pub fn new(table: [PhaseDescriptor; Phase::COUNT], initial: Phase) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
        }
    }

    /// Run the initial `on_enter` for the starting phase.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut OvenContext) {
        info!("FSM starting in phase: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the oven by one logical step.
    ///
    /// 1. Clear the tick report.
    /// 2. Call `on_update` for the current phase.
    /// 3. While it returns `Some(next)`: transition, then run `on_update`
    ///    of the new phase.
    pub fn tick(&mut self, ctx: &mut OvenContext) {
        self.tick_count += 1;
        ctx.report = TickReport::default();

        let mut hops = 0;
        while let Some(next) = (self.table[self.current].on_update)(ctx) {
            if next as usize != self.current {
                self.transition(next, ctx);
            }
            hops += 1;
            if hops >= Phase::COUNT {
                break;
            }
        }
    }

    /// Force an immediate transition (test fixtures, recovery).
    pub fn force_transition(&mut self, next: Phase, ctx: &mut OvenContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current phase.
    pub fn current_phase(&self) -> Phase {
        Phase::from_index(self.current)
    }

    /// Total ticks since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: Phase, ctx: &mut OvenContext) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
