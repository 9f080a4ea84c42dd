//! Thread-safe oven handle and the background ticker.
//!
//! ```text
//!  RPC threads ──load/heat/get_state──┐
//!                                     ▼
//!                         ┌──────────────────────┐
//!                         │ Mutex<OvenCore>      │
//!                         │  OvenService + sink  │
//!                         └──────────────────────┘
//!                                     ▲
//!  ticker thread ──sleep(interval)──tick──┘   (holds the lock through unload)
//! ```
//!
//! Every operation, including the unload pause inside a tick, runs inside
//! the one critical section, so callers only ever observe complete states
//! and all operations are totally ordered by the lock.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use log::info;

use crate::adapters::log_sink::LogEventSink;
use crate::adapters::time::SystemClock;
use crate::app::commands::OvenCommand;
use crate::app::ports::{Clock, EventSink};
use crate::app::service::OvenService;
use crate::config::OvenConfig;
use crate::fsm::Phase;
use crate::fsm::context::OvenSnapshot;

struct OvenCore {
    service: OvenService,
    sink: Box<dyn EventSink>,
}

struct Shared {
    core: Mutex<OvenCore>,
    clock: Arc<dyn Clock>,
}

/// Cloneable handle to the single shared oven.
#[derive(Clone)]
pub struct Oven {
    shared: Arc<Shared>,
}

impl Oven {
    /// Build and start an oven with explicit adapters.
    pub fn new(config: OvenConfig, clock: Arc<dyn Clock>, mut sink: Box<dyn EventSink>) -> Self {
        let mut service = OvenService::new(config);
        service.start(sink.as_mut());
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(OvenCore { service, sink }),
                clock,
            }),
        }
    }

    /// Build an oven that sleeps on the OS clock and logs its events.
    pub fn with_system_adapters(config: OvenConfig) -> Self {
        Self::new(config, Arc::new(SystemClock::new()), Box::new(LogEventSink::new()))
    }

    // ── Producer-facing operations ────────────────────────────

    /// Current phase.
    pub fn get_state(&self) -> Phase {
        self.lock().service.phase()
    }

    /// Add items.  `false` if the oven is heating.
    pub fn load(&self, amount: i32) -> bool {
        self.apply(OvenCommand::Load(amount))
    }

    /// Adjust the temperature.  `false` if the oven is loading.
    pub fn heat(&self, amount: i32) -> bool {
        self.apply(OvenCommand::Heat(amount))
    }

    /// Atomic copy of every counter.
    pub fn snapshot(&self) -> OvenSnapshot {
        self.lock().service.snapshot()
    }

    /// Copy of the oven configuration.
    pub fn config(&self) -> OvenConfig {
        self.lock().service.config().clone()
    }

    // ── Time-driven progression ───────────────────────────────

    /// Advance the oven by one tick.  Only the ticker (and tests) call this.
    pub fn tick(&self) {
        let mut guard = self.lock();
        let core = &mut *guard;
        core.service.tick(self.shared.clock.as_ref(), core.sink.as_mut());
    }

    /// Spawn the background thread that ticks once per configured interval.
    pub fn spawn_ticker(&self) -> io::Result<Ticker> {
        let oven = self.clone();
        let interval = self.config().tick_interval();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("oven-ticker".into())
            .spawn(move || {
                info!("Ticker running every {:?}", interval);
                loop {
                    oven.shared.clock.sleep(interval);
                    if stop_flag.load(Ordering::Acquire) {
                        break;
                    }
                    oven.tick();
                }
                info!("Ticker stopped");
            })?;

        Ok(Ticker { stop, handle })
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply(&self, cmd: OvenCommand) -> bool {
        let mut guard = self.lock();
        let core = &mut *guard;
        core.service.handle_command(cmd, core.sink.as_mut())
    }

    /// No code path panics while holding the lock, so a poisoned mutex
    /// still guards a consistent state.
    fn lock(&self) -> MutexGuard<'_, OvenCore> {
        self.shared.core.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to the running ticker thread.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Ask the ticker to stop after its current sleep and wait for it.
    /// A tick already in progress always completes.
    pub fn shutdown(self) {
        self.stop.store(true, Ordering::Release);
        if self.handle.join().is_err() {
            log::error!("Ticker thread panicked");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}
