//! Game clock, configuration, and the background clock driver for Starlane.
//!
//! # Modules
//!
//! - [`calendar`] -- GST calendar formatting and human-readable durations.
//! - [`clock`] -- [`SimClock`]: fixed-point real-to-game time accumulation
//!   and fixed-step ticks, published to [`ClockReader`]s through atomics.
//! - [`config`] -- Configuration loading from `starlane-config.yaml` into
//!   strongly-typed structs.
//! - [`driver`] -- The single background task that advances the clock.
//!
//! [`SimClock`]: clock::SimClock
//! [`ClockReader`]: clock::ClockReader

pub mod calendar;
pub mod clock;
pub mod config;
pub mod driver;
