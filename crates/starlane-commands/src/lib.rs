//! Text command interpreter for the Starlane world simulation.
//!
//! A host parses nothing itself: it hands each input line to
//! [`CommandRouter::execute_line`] together with the caller's [`Context`]
//! and gets a [`CommandResult`] back. Handlers never fail by panicking or
//! by returning `Err`; every outcome, good or bad, is a result value.
//!
//! # Modules
//!
//! - [`router`] -- The verb dispatch table, command and result types.
//! - [`routing`] -- `gates`, `route`, `nearby` over the gate network.
//! - [`misc`] -- `random_system`, `random_route` sampling.
//! - [`time`] -- `time`, `duration`, `when` over the game clock.

pub mod misc;
pub mod router;
pub mod routing;
pub mod time;

use std::sync::Arc;

use rand::rngs::StdRng;
use starlane_core::clock::ClockReader;
use starlane_world::WorldRegistry;

pub use misc::register_misc_commands;
pub use router::{
    Access, Command, CommandHandler, CommandResult, CommandRouter, Context, ErrorCode,
    RegistrationError,
};
pub use routing::register_routing_commands;
pub use time::register_time_commands;

/// Register every built-in verb into `router`.
///
/// # Errors
///
/// Returns [`RegistrationError`] if any built-in verb is already taken.
pub fn register_all(
    router: &mut CommandRouter,
    world: &Arc<WorldRegistry>,
    clock: &ClockReader,
    rng: StdRng,
) -> Result<(), RegistrationError> {
    register_routing_commands(router, world)?;
    register_misc_commands(router, world, rng)?;
    register_time_commands(router, clock)?;
    tracing::debug!(verbs = ?router.verbs(), "commands registered");
    Ok(())
}
