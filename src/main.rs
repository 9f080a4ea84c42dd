//! Bread oven simulator: server and producers.
//!
//! ```text
//! ┌──────────────┐   RPC (TCP)   ┌───────────────────────────────┐
//! │ breadoven    │──────────────▶│ breadoven serve               │
//! │   load       │               │                               │
//! └──────────────┘               │  RpcServer ─▶ Oven ◀─ Ticker  │
//! ┌──────────────┐               │              (Mutex)          │
//! │ breadoven    │──────────────▶│                               │
//! │   heat       │               └───────────────────────────────┘
//! └──────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use breadoven::adapters::config_file::JsonConfigFile;
use breadoven::adapters::time::SystemClock;
use breadoven::app::ports::ConfigPort;
use breadoven::config::AppConfig;
use breadoven::oven::Oven;
use breadoven::producer::{Producer, Role};
use breadoven::rpc::server::RpcServer;

#[derive(Parser)]
#[command(name = "breadoven")]
#[command(about = "Bread oven simulator with loader and heater producers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "breadoven.json")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Run the oven and serve RPC requests
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Run the loader producer
    Load {
        /// Oven server address (overrides the config file)
        #[arg(short, long)]
        server: Option<String>,
    },
    /// Run the heater producer
    Heat {
        /// Oven server address (overrides the config file)
        #[arg(short, long)]
        server: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_thread_names(verbose >= 1)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("Verbosity level: {}", cli.verbose);

    let config = JsonConfigFile::new(&cli.config)
        .load()
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Command::Serve { listen } => serve(config, listen),
        Command::Load { server } => produce(config, Role::Loader, server),
        Command::Heat { server } => produce(config, Role::Heater, server),
    }
}

fn serve(config: AppConfig, listen: Option<String>) -> Result<()> {
    let addr = listen.unwrap_or_else(|| config.oven.listen_addr.clone());
    info!(
        "Oven: capacity {}, temperature range {}..={}, tick {:?}",
        config.oven.max_load,
        config.oven.min_temp,
        config.oven.max_temp,
        config.oven.tick_interval()
    );

    let oven = Oven::with_system_adapters(config.oven);
    let ticker = oven.spawn_ticker().context("spawning ticker")?;
    let server = RpcServer::bind(addr.as_str(), oven)
        .with_context(|| format!("binding {}", addr))?;

    let result = server.serve().context("serving RPC");
    ticker.shutdown();
    result
}

fn produce(config: AppConfig, role: Role, server: Option<String>) -> Result<()> {
    let mut producer_config = config.producer;
    if let Some(addr) = server {
        producer_config.server_addr = addr;
    }
    let clock = Arc::new(SystemClock::new());
    let mut producer = Producer::new(role, producer_config, clock, rand::rng());
    producer.run()
}
