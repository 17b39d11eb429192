//! Deterministic game clock for the Starlane simulation.
//!
//! The clock converts real elapsed time into game time in two stages:
//!
//! 1. Real nanoseconds times the configured scale are accumulated as exact
//!    fixed-point game time. Whole game seconds are committed to the game
//!    second counter; the fractional remainder carries over to the next
//!    update, so no sub-second time is ever dropped or counted twice.
//! 2. Committed game seconds are consumed in fixed `tick_step` quanta. Each
//!    quantum advances the tick counter exactly once, catching up several
//!    ticks when updates are infrequent.
//!
//! # Ownership
//!
//! A [`SimClock`] has exactly one owner (the driver task) which is the only
//! code that advances it. After every update the counters are published to
//! atomics shared with any number of [`ClockReader`]s.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use tracing::trace;

use crate::calendar;
use crate::config::TimeConfig;

/// Fixed-point units per game second (femtoseconds).
const UNITS_PER_GAME_SECOND: u128 = 1_000_000_000_000_000;

/// Resolution of the configured scale: it is stored in millionths.
const SCALE_RESOLUTION: f64 = 1_000_000.0;

/// Largest accepted scale (game seconds per real second).
const MAX_SCALE: f64 = 1_000_000_000.0;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid time configuration (e.g. zero tick step).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// A game-second offset falls outside the representable calendar.
    #[error("game second {seconds} is outside the representable calendar")]
    CalendarOutOfRange {
        /// The offending offset from the start date.
        seconds: i64,
    },
}

/// What a single update changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockAdvance {
    /// Whole game seconds committed by this update.
    pub committed_seconds: i64,
    /// Ticks stepped by this update.
    pub ticks: u64,
}

/// Game seconds and tick count read together from a [`ClockReader`].
///
/// Both values come from the same update or the seconds are newer, so
/// `tick_count * tick_step` never exceeds `game_seconds`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockSnapshot {
    /// Whole game seconds since the start date.
    pub game_seconds: i64,
    /// Ticks stepped since the start.
    pub tick_count: u64,
}

/// Counters published by the owning clock.
#[derive(Debug, Default)]
struct ClockShared {
    game_seconds: AtomicI64,
    tick_count: AtomicU64,
}

/// The single-owner game clock.
#[derive(Debug)]
pub struct SimClock {
    /// Configuration the clock was built from.
    config: Arc<TimeConfig>,
    /// Midnight of the start date.
    start: NaiveDateTime,
    /// Scale in game-second millionths per real second.
    scale_micros: u128,
    /// Real instant of the previous update.
    last_real: Instant,
    /// Uncommitted fractional game time, in [`UNITS_PER_GAME_SECOND`] units.
    accumulator: u128,
    /// Whole game seconds since the start date.
    game_seconds: i64,
    /// Game seconds already consumed by ticks.
    tick_debt: i64,
    /// Ticks stepped since the start.
    tick_count: u64,
    /// Published copy of the counters.
    shared: Arc<ClockShared>,
}

impl SimClock {
    /// Create a clock at game second zero, starting real time now.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the start date does not
    /// exist, the scale is not a finite positive number (at most one
    /// billion), or the tick step is below one second.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        let start = calendar::start_datetime(config)?;
        let scale_micros = scale_to_micros(config.game_seconds_per_real_second)?;
        if config.tick_step_game_seconds < 1 {
            return Err(ClockError::InvalidConfig {
                reason: "tick_step_game_seconds must be at least 1".to_owned(),
            });
        }

        Ok(Self {
            config: Arc::new(config.clone()),
            start,
            scale_micros,
            last_real: Instant::now(),
            accumulator: 0,
            game_seconds: 0,
            tick_debt: 0,
            tick_count: 0,
            shared: Arc::new(ClockShared::default()),
        })
    }

    /// Advance by the real time elapsed since the previous update.
    pub fn update(&mut self) -> ClockAdvance {
        self.update_with(|_, _| {})
    }

    /// Like [`update`](Self::update), calling `on_tick(tick, game_seconds)`
    /// once per stepped tick.
    pub fn update_with<F>(&mut self, on_tick: F) -> ClockAdvance
    where
        F: FnMut(u64, i64),
    {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_real);
        self.last_real = now;
        self.advance_with(elapsed, on_tick)
    }

    /// Advance by an explicit real duration.
    ///
    /// This is the deterministic core of [`update`](Self::update); tests and
    /// replays drive it directly.
    pub fn advance(&mut self, elapsed: Duration) -> ClockAdvance {
        self.advance_with(elapsed, |_, _| {})
    }

    /// Advance by an explicit real duration, calling `on_tick(tick,
    /// game_seconds)` once per stepped tick. `game_seconds` is the tick's
    /// boundary, not the current time.
    pub fn advance_with<F>(&mut self, elapsed: Duration, mut on_tick: F) -> ClockAdvance
    where
        F: FnMut(u64, i64),
    {
        let gained = elapsed.as_nanos().saturating_mul(self.scale_micros);
        self.accumulator = self.accumulator.saturating_add(gained);

        let whole = self.accumulator.checked_div(UNITS_PER_GAME_SECOND).unwrap_or(0);
        self.accumulator = self
            .accumulator
            .checked_rem(UNITS_PER_GAME_SECOND)
            .unwrap_or(0);
        let committed = i64::try_from(whole).unwrap_or(i64::MAX);
        self.game_seconds = self.game_seconds.saturating_add(committed);

        let step = self.config.tick_step_game_seconds;
        let mut ticks: u64 = 0;
        loop {
            match self.tick_debt.checked_add(step) {
                Some(next) if next <= self.game_seconds => {
                    self.tick_debt = next;
                    self.tick_count = self.tick_count.saturating_add(1);
                    ticks = ticks.saturating_add(1);
                    on_tick(self.tick_count, next);
                }
                _ => break,
            }
        }

        self.publish();

        if ticks > 0 {
            trace!(
                ticks,
                tick_count = self.tick_count,
                game_seconds = self.game_seconds,
                "Clock stepped"
            );
        }

        ClockAdvance {
            committed_seconds: committed,
            ticks,
        }
    }

    /// Whole game seconds since the start date.
    pub const fn now_game_seconds(&self) -> i64 {
        self.game_seconds
    }

    /// Ticks stepped since the start.
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Current time as a GST timestamp.
    pub fn now_calendar_string(&self) -> String {
        calendar_or_offset(self.start, self.game_seconds)
    }

    /// The configuration the clock was built from.
    pub fn config(&self) -> &TimeConfig {
        &self.config
    }

    /// A cheap, cloneable read handle for other tasks.
    pub fn reader(&self) -> ClockReader {
        ClockReader {
            config: Arc::clone(&self.config),
            start: self.start,
            shared: Arc::clone(&self.shared),
        }
    }

    // Seconds before ticks: a reader that loads ticks first never sees
    // ticks ahead of the seconds that produced them.
    fn publish(&self) {
        self.shared
            .game_seconds
            .store(self.game_seconds, Ordering::Release);
        self.shared
            .tick_count
            .store(self.tick_count, Ordering::Release);
    }
}

/// Read-only view of a [`SimClock`] shared across tasks.
///
/// Values reflect the owner's most recent update.
#[derive(Debug, Clone)]
pub struct ClockReader {
    config: Arc<TimeConfig>,
    start: NaiveDateTime,
    shared: Arc<ClockShared>,
}

impl ClockReader {
    /// Whole game seconds since the start date.
    pub fn now_game_seconds(&self) -> i64 {
        self.shared.game_seconds.load(Ordering::Acquire)
    }

    /// Ticks stepped since the start.
    pub fn tick_count(&self) -> u64 {
        self.shared.tick_count.load(Ordering::Acquire)
    }

    /// Game seconds and tick count as one consistent pair.
    pub fn snapshot(&self) -> ClockSnapshot {
        let tick_count = self.shared.tick_count.load(Ordering::Acquire);
        let game_seconds = self.shared.game_seconds.load(Ordering::Acquire);
        ClockSnapshot {
            game_seconds,
            tick_count,
        }
    }

    /// Current time as a GST timestamp.
    pub fn now_calendar_string(&self) -> String {
        self.calendar_or_offset(self.now_game_seconds())
    }

    /// GST timestamp for `game_seconds`, or a raw offset once the calendar
    /// runs out.
    pub fn calendar_or_offset(&self, game_seconds: i64) -> String {
        calendar_or_offset(self.start, game_seconds)
    }

    /// GST timestamp for an arbitrary game-second offset.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::CalendarOutOfRange`] if the instant cannot be
    /// represented.
    pub fn calendar_at(&self, game_seconds: i64) -> Result<String, ClockError> {
        calendar::format_from(self.start, game_seconds)
    }

    /// The clock's configuration.
    pub fn config(&self) -> &TimeConfig {
        &self.config
    }
}

/// Calendar string, or a raw offset once the calendar runs out.
fn calendar_or_offset(start: NaiveDateTime, seconds: i64) -> String {
    calendar::format_from(start, seconds).unwrap_or_else(|_| format!("GST +{seconds}s"))
}

/// Convert a scale in game seconds per real second to millionths.
fn scale_to_micros(scale: f64) -> Result<u128, ClockError> {
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_SCALE {
        return Err(ClockError::InvalidConfig {
            reason: format!("game_seconds_per_real_second must be in (0, 1e9], got {scale}"),
        });
    }
    let micros = (scale * SCALE_RESOLUTION).round();
    if micros < 1.0 {
        return Err(ClockError::InvalidConfig {
            reason: format!("game_seconds_per_real_second {scale} is below 1e-6 resolution"),
        });
    }
    // Bounded to [1, 1e15] by the checks above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let micros = micros as u128;
    Ok(micros)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(scale: f64, step: i64) -> TimeConfig {
        TimeConfig {
            game_seconds_per_real_second: scale,
            tick_step_game_seconds: step,
            ..TimeConfig::default()
        }
    }

    #[test]
    fn clock_starts_at_zero() {
        let clock = SimClock::new(&TimeConfig::default()).unwrap();
        assert_eq!(clock.now_game_seconds(), 0);
        assert_eq!(clock.tick_count(), 0);
        assert_eq!(clock.now_calendar_string(), "GST 2350-01-01 00:00");
    }

    #[test]
    fn one_real_second_at_default_scale() {
        let mut clock = SimClock::new(&TimeConfig::default()).unwrap();
        let advance = clock.advance(Duration::from_secs(1));
        assert_eq!(advance.committed_seconds, 36);
        assert_eq!(clock.now_game_seconds(), 36);
        assert_eq!(advance.ticks, 0);
    }

    #[test]
    fn fractions_carry_over() {
        // 0.5 game seconds per real second: two 1 s updates make one second.
        let mut clock = SimClock::new(&config(0.5, 600)).unwrap();
        assert_eq!(clock.advance(Duration::from_secs(1)).committed_seconds, 0);
        assert_eq!(clock.advance(Duration::from_secs(1)).committed_seconds, 1);
        assert_eq!(clock.now_game_seconds(), 1);
    }

    #[test]
    fn fine_grained_updates_lose_nothing() {
        // 36 game seconds per real second, updated every 7 ms for 10 s.
        let mut clock = SimClock::new(&config(36.0, 600)).unwrap();
        let mut previous = 0;
        let mut total = Duration::ZERO;
        while total < Duration::from_secs(10) {
            clock.advance(Duration::from_millis(7));
            total = total.saturating_add(Duration::from_millis(7));
            assert!(clock.now_game_seconds() >= previous);
            previous = clock.now_game_seconds();
        }
        // 10.003 s of real time -> floor(360.108) game seconds.
        assert_eq!(total, Duration::from_millis(10_003));
        assert_eq!(clock.now_game_seconds(), 360);
    }

    #[test]
    fn non_integral_scale_matches_floor() {
        let mut clock = SimClock::new(&config(1.5, 600)).unwrap();
        for _ in 0..1000 {
            clock.advance(Duration::from_millis(3));
        }
        // 3 s * 1.5 = 4.5 -> 4.
        assert_eq!(clock.now_game_seconds(), 4);
    }

    #[test]
    fn ticks_step_in_fixed_quanta() {
        let mut clock = SimClock::new(&config(60.0, 600)).unwrap();
        // 9 real seconds -> 540 game seconds: no tick yet.
        assert_eq!(clock.advance(Duration::from_secs(9)).ticks, 0);
        // 10 real seconds -> 600 game seconds: one tick.
        assert_eq!(clock.advance(Duration::from_secs(1)).ticks, 1);
        assert_eq!(clock.tick_count(), 1);
    }

    #[test]
    fn infrequent_updates_catch_up() {
        let mut clock = SimClock::new(&config(60.0, 600)).unwrap();
        let mut seen = Vec::new();
        let advance = clock.advance_with(Duration::from_secs(35), |tick, at| seen.push((tick, at)));
        // 2100 game seconds -> 3 ticks, 300 s left over in the debt.
        assert_eq!(advance.ticks, 3);
        assert_eq!(seen, vec![(1, 600), (2, 1200), (3, 1800)]);
        assert_eq!(clock.now_game_seconds(), 2100);
    }

    #[test]
    fn reader_sees_published_values() {
        let mut clock = SimClock::new(&config(60.0, 600)).unwrap();
        let reader = clock.reader();
        assert_eq!(reader.now_game_seconds(), 0);
        clock.advance(Duration::from_secs(1_440));
        // 86400 game seconds: one day, 144 ticks.
        assert_eq!(reader.now_game_seconds(), 86_400);
        assert_eq!(reader.tick_count(), 144);
        assert_eq!(reader.now_calendar_string(), "GST 2350-01-02 00:00");
        assert_eq!(reader.calendar_at(90).unwrap(), "GST 2350-01-01 00:01");
    }

    #[test]
    fn update_uses_real_time() {
        let mut clock = SimClock::new(&config(1_000_000.0, 600)).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        clock.update();
        // At least 5 ms * 1e6 = 5000 game seconds.
        assert!(clock.now_game_seconds() >= 5_000);
        assert!(clock.tick_count() >= 8);
    }

    #[test]
    fn invalid_configs_rejected() {
        assert!(SimClock::new(&config(0.0, 600)).is_err());
        assert!(SimClock::new(&config(-1.0, 600)).is_err());
        assert!(SimClock::new(&config(f64::NAN, 600)).is_err());
        assert!(SimClock::new(&config(f64::INFINITY, 600)).is_err());
        assert!(SimClock::new(&config(1e-9, 600)).is_err());
        assert!(SimClock::new(&config(36.0, 0)).is_err());
        let bad_date = TimeConfig {
            start_month: 13,
            ..TimeConfig::default()
        };
        assert!(SimClock::new(&bad_date).is_err());
    }
}
