//! Tick callback that reports clock progress through tracing.
//!
//! Every tick is logged at `debug`; the first tick of each new game day is
//! also logged at `info` so a default-level log shows the calendar moving.

use starlane_core::calendar::SECONDS_PER_DAY;
use starlane_core::clock::ClockReader;
use starlane_core::driver::TickCallback;
use tracing::{debug, info};

/// Callback that logs ticks and day rollovers.
pub struct TickLogger {
    clock: ClockReader,
    last_day: i64,
}

impl TickLogger {
    /// Create a logger that formats timestamps with `clock`.
    pub const fn new(clock: ClockReader) -> Self {
        Self { clock, last_day: 0 }
    }
}

impl TickCallback for TickLogger {
    fn on_tick(&mut self, tick: u64, game_seconds: i64) {
        let gst = self
            .clock
            .calendar_at(game_seconds)
            .unwrap_or_else(|e| e.to_string());
        debug!(tick, game_seconds, gst = %gst, "Tick");

        let day = game_seconds.div_euclid(SECONDS_PER_DAY);
        if day != self.last_day {
            self.last_day = day;
            info!(tick, day, gst = %gst, "New game day");
        }
    }
}
