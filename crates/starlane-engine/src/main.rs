//! Reference host for the Starlane simulation.
//!
//! Wires the world, the game clock and the command router together, runs
//! the clock driver in the background, and serves a line-oriented console
//! on stdin/stdout until end of input or Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `starlane-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Build the world (generated or dev fixture)
//! 4. Create the game clock from the time config
//! 5. Register every command verb
//! 6. Spawn the clock driver
//! 7. Run the console
//! 8. Stop the driver and log the final clock state

mod console;
mod error;
mod tick_logger;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use starlane_commands::{CommandRouter, Context};
use starlane_core::clock::SimClock;
use starlane_core::config::{SimulationConfig, WorldConfig, WorldSource};
use starlane_core::driver;
use starlane_types::CallerId;
use starlane_world::{GeneratorOptions, WorldRegistry};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::tick_logger::TickLogger;

/// Configuration file looked up in the working directory.
const CONFIG_PATH: &str = "starlane-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the console fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration. Logging depends on it, so report afterwards.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        config_file = from_file,
        source = ?config.world.source,
        seed = config.world.seed,
        location_count = config.world.location_count,
        "starlane-engine starting"
    );

    // 3. Build the world.
    let world = Arc::new(build_world(&config.world)?);
    info!(
        locations = world.location_count(),
        gates = world.gates().gate_count(),
        connected = world.gates().is_connected(),
        "World ready"
    );

    // 4. Create the game clock.
    let clock = SimClock::new(&config.time)?;
    let reader = clock.reader();
    info!(start = %reader.now_calendar_string(), "Game clock initialized");

    // 5. Register commands.
    let mut router = CommandRouter::new();
    starlane_commands::register_all(&mut router, &world, &reader, StdRng::from_os_rng())?;
    info!(verbs = router.verbs().len(), "Commands registered");

    // 6. Spawn the clock driver.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let interval = Duration::from_millis(config.driver.update_interval_ms);
    let mut logger = TickLogger::new(reader.clone());
    let driver_handle = tokio::spawn(async move {
        driver::run_clock_driver(clock, interval, shutdown_rx, &mut logger).await
    });

    // 7. Serve the console until EOF or Ctrl-C. On Ctrl-C the stdin thread
    // is left blocked in its read and ends with the process.
    let context = Context::new(CallerId::new(config.host.caller_id));
    let lines = console::spawn_stdin_reader()?;
    let stdout = tokio::io::stdout();
    let console = console::run_console(&router, &context, config.host.output, lines, stdout);

    let outcome = tokio::select! {
        result = console => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received");
            Ok(0)
        }
    };

    // 8. Stop the driver.
    if shutdown_tx.send(true).is_err() {
        warn!("Clock driver already stopped");
    }
    let clock = driver_handle.await.map_err(|e| EngineError::Driver {
        message: e.to_string(),
    })?;

    let executed = outcome?;
    info!(
        commands = executed,
        game_seconds = clock.now_game_seconds(),
        tick_count = clock.tick_count(),
        gst = %clock.now_calendar_string(),
        "starlane-engine shutdown complete"
    );

    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults.
///
/// Returns whether the file was found.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok((SimulationConfig::from_file(config_path)?, true))
    } else {
        let mut config = SimulationConfig::default();
        config.world.apply_overrides(|key| std::env::var(key).ok());
        Ok((config, false))
    }
}

/// Build the world described by `config`.
fn build_world(config: &WorldConfig) -> Result<WorldRegistry, EngineError> {
    match config.source {
        WorldSource::Dev => {
            let (world, _) = starlane_world::dev_world()?;
            Ok(world)
        }
        WorldSource::Generated => {
            let options = GeneratorOptions {
                connectivity: config.connectivity,
                ..GeneratorOptions::new(config.location_count, config.seed)
            };
            Ok(starlane_world::generate_with(options)?)
        }
    }
}
