//! Oven behaviour through the thread-safe handle.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use breadoven::adapters::time::SystemClock;
use breadoven::app::events::OvenEvent;
use breadoven::app::ports::EventSink;
use breadoven::config::OvenConfig;
use breadoven::fsm::Phase;
use breadoven::oven::Oven;

use crate::mock_clock::Rig;

// ── Loading ───────────────────────────────────────────────────

#[test]
fn fills_in_five_loads_then_heats_on_next_tick() {
    let rig = Rig::new();
    for _ in 0..5 {
        assert!(rig.oven.load(10));
        assert_eq!(rig.oven.get_state(), Phase::Loading);
    }
    assert_eq!(rig.oven.snapshot().item_count, 50);

    rig.oven.tick();
    assert_eq!(rig.oven.get_state(), Phase::Heating);
    assert!(rig.sink.events().contains(&OvenEvent::PhaseChanged {
        from: Phase::Loading,
        to: Phase::Heating
    }));
}

#[test]
fn heat_while_loading_changes_nothing() {
    let rig = Rig::new();
    let before = rig.oven.snapshot();
    assert!(!rig.oven.heat(3));
    assert_eq!(rig.oven.snapshot(), before);
    assert_eq!(rig.sink.count(|e| matches!(e, OvenEvent::HeatRejected { amount: 3 })), 1);
}

#[test]
fn load_accepts_any_integer() {
    let rig = Rig::new();
    assert!(rig.oven.load(-5));
    assert_eq!(rig.oven.snapshot().item_count, -5);
    assert!(rig.oven.load(80));
    rig.oven.tick();
    assert_eq!(rig.oven.get_state(), Phase::Heating);
    assert_eq!(rig.oven.snapshot().item_count, 75);
}

#[test]
fn loading_ticks_do_not_bake() {
    let rig = Rig::new();
    assert!(rig.oven.load(49));
    rig.ticks(10);
    let s = rig.oven.snapshot();
    assert_eq!(s.phase, Phase::Loading);
    assert_eq!((s.bake_progress, s.bake_timer, s.burn_timer), (0, 0, 0));
}

// ── Heating ───────────────────────────────────────────────────

#[test]
fn heat_is_refused_to_loaders_and_accepted_from_heaters() {
    let rig = Rig::new();
    rig.fill_and_heat();
    assert!(!rig.oven.load(1));
    assert!(rig.oven.heat(-3));
    assert_eq!(rig.oven.snapshot().temperature, -3);
}

#[test]
fn cold_oven_makes_no_progress() {
    let rig = Rig::new();
    rig.fill_and_heat();
    assert!(rig.oven.heat(-1));
    rig.ticks(8);
    let s = rig.oven.snapshot();
    assert_eq!(s.phase, Phase::Heating);
    assert_eq!((s.bake_progress, s.bake_timer, s.burn_timer), (0, 0, 0));
}

#[test]
fn full_bake_then_unload_pauses_and_empties() {
    let rig = Rig::new();
    rig.fill_and_heat();
    assert!(rig.oven.heat(5));
    // The tick that entered Heating already counted one in-range tick.
    rig.ticks(19);
    let s = rig.oven.snapshot();
    assert_eq!(s.phase, Phase::Heating);
    assert_eq!(s.bake_progress, 10);
    assert!(rig.clock.sleeps().is_empty());

    rig.oven.tick();
    let s = rig.oven.snapshot();
    assert_eq!(s.phase, Phase::Loading);
    assert_eq!(
        (s.item_count, s.temperature, s.bake_progress, s.bake_timer, s.burn_timer),
        (0, 0, 0, 0, 0)
    );
    assert_eq!(rig.clock.sleeps(), vec![Duration::from_secs(5)]);

    let events = rig.sink.events();
    let unloading = events.iter().position(|e| *e == OvenEvent::Unloading).unwrap();
    assert_eq!(events[unloading + 1], OvenEvent::Unloaded);
    assert_eq!(
        events[unloading + 2],
        OvenEvent::PhaseChanged {
            from: Phase::Heating,
            to: Phase::Loading
        }
    );
    assert_eq!(rig.sink.count(|e| matches!(e, OvenEvent::BakeProgressed(_))), 10);
}

#[test]
fn four_overheated_ticks_burn_the_batch() {
    let rig = Rig::new();
    rig.fill_and_heat();
    assert!(rig.oven.heat(11));

    rig.ticks(3);
    let s = rig.oven.snapshot();
    assert_eq!((s.burn_timer, s.bake_timer, s.item_count), (3, 0, 50));

    rig.oven.tick();
    let s = rig.oven.snapshot();
    assert_eq!(s.phase, Phase::Heating);
    assert_eq!((s.item_count, s.temperature, s.burn_timer), (0, 0, 0));
    assert_eq!(rig.sink.count(|e| *e == OvenEvent::Burned), 1);

    rig.oven.tick();
    assert_eq!(rig.oven.get_state(), Phase::Loading);
    assert!(rig.clock.sleeps().is_empty(), "a burn is not an unload");
}

#[test]
fn cooling_down_in_time_saves_the_batch() {
    let rig = Rig::new();
    rig.fill_and_heat();
    assert!(rig.oven.heat(11));
    rig.ticks(3);
    assert!(rig.oven.heat(-1));
    rig.oven.tick();
    let s = rig.oven.snapshot();
    assert_eq!((s.item_count, s.burn_timer, s.bake_timer), (50, 0, 1));
}

#[test]
fn telemetry_every_ten_ticks() {
    let rig = Rig::new();
    rig.ticks(25);
    assert_eq!(rig.sink.count(|e| matches!(e, OvenEvent::Telemetry(_))), 2);
}

// ── Concurrency ───────────────────────────────────────────────

#[test]
fn concurrent_callers_never_see_torn_state() {
    let rig = Rig::new();
    let oven = rig.oven.clone();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let oven = oven.clone();
            thread::spawn(move || {
                for n in 0..500 {
                    match (i + n) % 4 {
                        0 => {
                            oven.load(7);
                        }
                        1 => {
                            oven.heat(if n % 3 == 0 { 4 } else { -2 });
                        }
                        2 => {
                            oven.get_state();
                        }
                        _ => {
                            let s = oven.snapshot();
                            assert!(s.bake_timer == 0 || s.burn_timer == 0);
                            assert!(s.bake_progress <= 10);
                            assert!(s.bake_timer < 2);
                            assert!(s.burn_timer < 4);
                            if s.phase == Phase::Loading {
                                assert_eq!((s.bake_progress, s.bake_timer, s.burn_timer), (0, 0, 0));
                            }
                        }
                    }
                }
            })
        })
        .collect();

    for _ in 0..500 {
        rig.oven.tick();
    }
    for w in workers {
        w.join().unwrap();
    }
}

/// Signals once the oven starts unloading; the oven lock is held then.
struct UnloadSignal(mpsc::Sender<()>);

impl EventSink for UnloadSignal {
    fn emit(&mut self, event: &OvenEvent) {
        if *event == OvenEvent::Unloading {
            let _ = self.0.send(());
        }
    }
}

#[test]
fn callers_block_for_the_whole_unload() {
    let config = OvenConfig {
        tick_interval_ms: 20,
        ..OvenConfig::default()
    };
    let (tx, rx) = mpsc::channel();
    let oven = Oven::new(config, Arc::new(SystemClock::new()), Box::new(UnloadSignal(tx)));

    assert!(oven.load(50));
    oven.tick();
    assert!(oven.heat(5));
    for _ in 0..19 {
        oven.tick();
    }
    assert_eq!(oven.snapshot().bake_progress, 10);

    let ticker = {
        let oven = oven.clone();
        thread::spawn(move || oven.tick())
    };
    rx.recv().unwrap();
    let start = Instant::now();
    assert!(!oven.heat(1), "heat during unload must wait and then see Loading");
    assert!(start.elapsed() >= Duration::from_millis(50));
    assert_eq!(oven.snapshot().temperature, 0);
    ticker.join().unwrap();
}
