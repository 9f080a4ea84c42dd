//! System configuration parameters
//!
//! All tunable parameters for the oven and the two producers.
//! Values can be overridden from a JSON file through the
//! [`ConfigPort`](crate::app::ports::ConfigPort).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Oven state machine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvenConfig {
    // --- Loading ---
    /// Item count at which loading stops and heating begins
    pub max_load: i32,

    // --- Temperature band ---
    /// Lowest baking-eligible temperature (inclusive)
    pub min_temp: i32,
    /// Highest baking-eligible temperature (inclusive)
    pub max_temp: i32,

    // --- Baking ---
    /// Consecutive in-range ticks per bake step
    pub bake_step_ticks: u32,
    /// Bake steps until the batch is done (each step is 10%)
    pub bake_steps: u8,
    /// Consecutive over-range ticks before the batch burns
    pub burn_limit_ticks: u32,
    /// Ticks the oven stays locked while a finished batch is pulled out
    pub unload_ticks: u32,

    // --- Timing ---
    /// Tick interval (milliseconds)
    pub tick_interval_ms: u64,
    /// Telemetry report interval (ticks, 0 = off)
    pub telemetry_interval_ticks: u32,

    // --- Service ---
    /// Address the RPC server listens on
    pub listen_addr: String,
}

impl Default for OvenConfig {
    fn default() -> Self {
        Self {
            // Loading
            max_load: 50,

            // Temperature band
            min_temp: 0,
            max_temp: 10,

            // Baking
            bake_step_ticks: 2,
            bake_steps: 10,
            burn_limit_ticks: 4,
            unload_ticks: 5,

            // Timing
            tick_interval_ms: 1000,       // 1 Hz
            telemetry_interval_ticks: 10, // every 10 s

            // Service
            listen_addr: "127.0.0.1:5000".into(),
        }
    }
}

impl OvenConfig {
    /// Duration of one tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// How long the oven stays locked while unloading.  Saturates at
    /// `Duration::MAX`; `validate()` rejects configs that would get there.
    pub fn unload_duration(&self) -> Duration {
        self.tick_interval().saturating_mul(self.unload_ticks)
    }

    /// Reject values that would make the state machine degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_load <= 0 {
            return Err(ConfigError::ValidationFailed("max_load must be positive"));
        }
        if self.min_temp > self.max_temp {
            return Err(ConfigError::ValidationFailed(
                "min_temp must not exceed max_temp",
            ));
        }
        if self.bake_step_ticks == 0 || self.burn_limit_ticks == 0 {
            return Err(ConfigError::ValidationFailed(
                "bake_step_ticks and burn_limit_ticks must be non-zero",
            ));
        }
        if self.bake_steps == 0 {
            return Err(ConfigError::ValidationFailed("bake_steps must be non-zero"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_ms must be non-zero",
            ));
        }
        if self.tick_interval().checked_mul(self.unload_ticks).is_none() {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_ms * unload_ticks overflows",
            ));
        }
        Ok(())
    }
}

/// Producer (loader / heater client) configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// Oven RPC server address
    pub server_addr: String,
    /// Fixed part of the think delay before each attempt (milliseconds)
    pub think_base_ms: u64,
    /// Random extra think delay, drawn from `0..think_jitter_ms`
    pub think_jitter_ms: u64,
    /// Random delay between reading the phase and submitting, `0..settle_jitter_ms`
    pub settle_jitter_ms: u64,
    /// Back-off for the loader while the oven is heating (milliseconds)
    pub loader_busy_wait_ms: u64,
    /// Back-off for the heater while the oven is loading (milliseconds)
    pub heater_busy_wait_ms: u64,
    /// Delay before reconnecting after a transport error (milliseconds)
    pub reconnect_delay_ms: u64,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:5000".into(),
            think_base_ms: 500,
            think_jitter_ms: 1500,
            settle_jitter_ms: 500,
            loader_busy_wait_ms: 4000,
            heater_busy_wait_ms: 3000,
            reconnect_delay_ms: 2000,
        }
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub oven: OvenConfig,
    pub producer: ProducerConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.oven.validate()
    }
}
