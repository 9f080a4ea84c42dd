//! Mock adapters for integration tests.
//!
//! The clock records every sleep instead of blocking, and the sink keeps
//! every emitted event, so tests can assert on the full history.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use breadoven::app::events::OvenEvent;
use breadoven::app::ports::{Clock, EventSink};
use breadoven::config::OvenConfig;
use breadoven::oven::Oven;

// ── RecordingClock ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for RecordingClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Cloneable view of the events; the oven owns one clone.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<OvenEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OvenEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&OvenEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &OvenEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ── Fixture ───────────────────────────────────────────────────

pub struct Rig {
    pub oven: Oven,
    pub clock: Arc<RecordingClock>,
    pub sink: RecordingSink,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_config(OvenConfig::default())
    }

    pub fn with_config(config: OvenConfig) -> Self {
        let clock = Arc::new(RecordingClock::new());
        let sink = RecordingSink::new();
        let oven = Oven::new(config, clock.clone(), Box::new(sink.clone()));
        Self { oven, clock, sink }
    }

    /// Fill the oven to capacity and tick it into Heating.
    pub fn fill_and_heat(&self) {
        assert!(self.oven.load(50));
        self.oven.tick();
    }

    pub fn ticks(&self, n: usize) {
        for _ in 0..n {
            self.oven.tick();
        }
    }
}
