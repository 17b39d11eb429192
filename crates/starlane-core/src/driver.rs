//! The background task that owns and advances the game clock.
//!
//! Exactly one driver runs per process. It wakes on a fixed real-time
//! interval, calls [`SimClock::update_with`], and reports every stepped
//! tick to a [`TickCallback`]. Readers observe progress through
//! [`ClockReader`](crate::clock::ClockReader) handles taken before the
//! clock was moved into the driver.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::clock::SimClock;

/// Smallest accepted update interval.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Callback invoked once per stepped tick.
///
/// Ticks are reported in order. When an update catches up several ticks,
/// the callback runs once for each before the driver sleeps again.
pub trait TickCallback: Send {
    /// Called with the new tick count and the game second the tick ended on.
    fn on_tick(&mut self, tick: u64, game_seconds: i64);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _tick: u64, _game_seconds: i64) {}
}

/// Advance `clock` every `interval` until `shutdown` turns `true` or its
/// sender is dropped, then hand the clock back.
///
/// Intervals below one millisecond are raised to one millisecond. A late
/// wake-up does not burst: the real time it missed is simply folded into
/// the next update.
pub async fn run_clock_driver(
    mut clock: SimClock,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    callback: &mut dyn TickCallback,
) -> SimClock {
    let period = interval.max(MIN_INTERVAL);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
        scale = clock.config().game_seconds_per_real_second,
        tick_step = clock.config().tick_step_game_seconds,
        "Clock driver starting"
    );

    // Commit the time since construction; its ticks are reported like any other.
    clock.update_with(|tick, at| callback.on_tick(tick, at));

    loop {
        if *shutdown.borrow_and_update() {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                let advance = clock.update_with(|tick, at| callback.on_tick(tick, at));
                if advance.ticks > 1 {
                    debug!(ticks = advance.ticks, "Clock caught up on several ticks");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    debug!("Shutdown sender dropped");
                    break;
                }
            }
        }
    }

    info!(
        game_seconds = clock.now_game_seconds(),
        tick_count = clock.tick_count(),
        "Clock driver stopped"
    );

    clock
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::TimeConfig;

    struct RecordingCallback {
        ticks: Vec<u64>,
    }

    impl TickCallback for RecordingCallback {
        fn on_tick(&mut self, tick: u64, _game_seconds: i64) {
            self.ticks.push(tick);
        }
    }

    fn fast_config() -> TimeConfig {
        // One million game seconds per real second, ticks every 600.
        TimeConfig {
            game_seconds_per_real_second: 1_000_000.0,
            tick_step_game_seconds: 600,
            ..TimeConfig::default()
        }
    }

    #[tokio::test]
    async fn driver_advances_until_shutdown() {
        let clock = SimClock::new(&fast_config()).unwrap();
        let reader = clock.reader();
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut cb = RecordingCallback { ticks: Vec::new() };
            let clock = run_clock_driver(clock, Duration::from_millis(2), rx, &mut cb).await;
            (clock, cb)
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(reader.now_game_seconds() > 0);
        tx.send(true).unwrap();

        let (clock, cb) = handle.await.unwrap();
        assert_eq!(clock.tick_count(), reader.tick_count());
        assert!(clock.tick_count() > 0);

        // Ticks are reported once each, in order.
        let expected: Vec<u64> = (1..=clock.tick_count()).collect();
        assert_eq!(cb.ticks, expected);
    }

    #[tokio::test]
    async fn preset_shutdown_stops_immediately() {
        let clock = SimClock::new(&TimeConfig::default()).unwrap();
        let (_tx, rx) = watch::channel(true);
        let mut cb = NoOpCallback;

        let clock = run_clock_driver(clock, Duration::from_secs(3600), rx, &mut cb).await;
        assert_eq!(clock.tick_count(), 0);
    }

    #[tokio::test]
    async fn ticks_before_first_wake_reach_callback() {
        let clock = SimClock::new(&fast_config()).unwrap();
        // 5 ms at 1e6x is 5000 game seconds: at least 8 ticks of 600.
        std::thread::sleep(Duration::from_millis(5));
        let (_tx, rx) = watch::channel(true);
        let mut cb = RecordingCallback { ticks: Vec::new() };

        let clock = run_clock_driver(clock, Duration::from_secs(3600), rx, &mut cb).await;

        assert!(clock.tick_count() >= 8);
        let expected: Vec<u64> = (1..=clock.tick_count()).collect();
        assert_eq!(cb.ticks, expected);
    }

    #[tokio::test]
    async fn dropped_sender_stops_driver() {
        let clock = SimClock::new(&TimeConfig::default()).unwrap();
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let mut cb = NoOpCallback;

        let clock = run_clock_driver(clock, Duration::from_secs(3600), rx, &mut cb).await;
        assert_eq!(clock.tick_count(), 0);
    }
}
