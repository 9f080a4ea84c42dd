//! Loader and heater producers.
//!
//! Both roles run the same polling loop against the oven server:
//!
//! ```text
//!  draw amount ─▶ think ─▶ GetOvenState ─▶ settle ─┬─ wanted phase ─▶ Load/Heat
//!       ▲                                          └─ other phase ──▶ busy wait
//!       └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A transport error ends the session; [`Producer::run`] logs it, waits,
//! and reconnects.  Rejections are not errors: the oven may change phase
//! between the state query and the submit.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use crate::app::ports::Clock;
use crate::config::ProducerConfig;
use crate::error::{Error, Result};
use crate::fsm::Phase;
use crate::rpc::client::OvenClient;
use crate::rpc::transport::Transport;

/// Which producer this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Adds items while the oven is loading.
    Loader,
    /// Adjusts the temperature while the oven is heating.
    Heater,
}

impl Role {
    /// The phase in which this role's submissions are accepted.
    pub fn wanted_phase(self) -> Phase {
        match self {
            Self::Loader => Phase::Loading,
            Self::Heater => Phase::Heating,
        }
    }

    /// Half-open range the submitted amount is drawn from.  Loads are
    /// always positive; heat changes may cool the oven.
    pub fn amount_range(self) -> Range<i32> {
        match self {
            Self::Loader => 1..10,
            Self::Heater => -3..5,
        }
    }

    fn busy_wait(self, config: &ProducerConfig) -> Duration {
        Duration::from_millis(match self {
            Self::Loader => config.loader_busy_wait_ms,
            Self::Heater => config.heater_busy_wait_ms,
        })
    }

    fn submit<T: Transport>(self, client: &mut OvenClient<T>, amount: i32) -> Result<bool> {
        match self {
            Self::Loader => client.load(amount),
            Self::Heater => client.heat(amount),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loader => write!(f, "loading"),
            Self::Heater => write!(f, "heating"),
        }
    }
}

/// What one producer step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The amount was sent; `accepted` is the oven's answer.
    Submitted { amount: i32, accepted: bool },
    /// The oven was in the other phase; the producer backed off.
    Deferred(Phase),
}

pub struct Producer<R: Rng> {
    role: Role,
    config: ProducerConfig,
    clock: Arc<dyn Clock>,
    rng: R,
}

impl<R: Rng> Producer<R> {
    pub fn new(role: Role, config: ProducerConfig, clock: Arc<dyn Clock>, rng: R) -> Self {
        Self {
            role,
            config,
            clock,
            rng,
        }
    }

    /// One attempt: draw, think, poll, settle, then submit or back off.
    pub fn step<T: Transport>(&mut self, client: &mut OvenClient<T>) -> Result<StepOutcome> {
        let amount = self.rng.random_range(self.role.amount_range());

        let think = self.config.think_base_ms + self.jitter(self.config.think_jitter_ms);
        self.clock.sleep(Duration::from_millis(think));

        info!("{} component: checking the oven", self.role);
        let phase = client.get_oven_state()?;

        let settle = self.jitter(self.config.settle_jitter_ms);
        self.clock.sleep(Duration::from_millis(settle));

        if phase == self.role.wanted_phase() {
            let accepted = self.role.submit(client, amount)?;
            if accepted {
                info!("{} component: oven is {:?}, sent {}", self.role, phase, amount);
            } else {
                info!("{} component: {} refused, phase changed meanwhile", self.role, amount);
            }
            Ok(StepOutcome::Submitted { amount, accepted })
        } else {
            info!("{} component: oven is {:?}, will wait and try again", self.role, phase);
            self.clock.sleep(self.role.busy_wait(&self.config));
            Ok(StepOutcome::Deferred(phase))
        }
    }

    /// Run steps until the connection fails; returns the failure.
    pub fn run_session<T: Transport>(&mut self, client: &mut OvenClient<T>) -> Error {
        loop {
            if let Err(e) = self.step(client) {
                return e;
            }
        }
    }

    /// Connect, produce, and reconnect after errors, forever.
    pub fn run(&mut self) -> ! {
        let reconnect = Duration::from_millis(self.config.reconnect_delay_ms);
        loop {
            match OvenClient::connect(self.config.server_addr.as_str()) {
                Ok(mut client) => {
                    info!("I am {} component, connected to {}", self.role, self.config.server_addr);
                    let e = self.run_session(&mut client);
                    warn!("{} component: {}; will restart main loop", self.role, e);
                }
                Err(e) => warn!("{} component: connect failed: {}", self.role, e),
            }
            self.clock.sleep(reconnect);
        }
    }

    fn jitter(&mut self, max_ms: u64) -> u64 {
        if max_ms == 0 {
            0
        } else {
            self.rng.random_range(0..max_ms)
        }
    }
}
