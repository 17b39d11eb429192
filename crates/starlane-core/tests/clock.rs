//! Integration tests for the game clock and its readers.
//!
//! These pin the accumulation contract from the outside: however real time
//! is sliced into updates, the committed game time is the floor of the
//! total scaled time, and readers on other threads see it.

#![allow(clippy::unwrap_used)]

use std::thread;
use std::time::Duration;

use starlane_core::calendar::{days_to_seconds, format_duration};
use starlane_core::clock::SimClock;
use starlane_core::config::TimeConfig;

fn config(scale: f64, step: i64) -> TimeConfig {
    TimeConfig {
        game_seconds_per_real_second: scale,
        tick_step_game_seconds: step,
        ..TimeConfig::default()
    }
}

#[test]
fn slicing_does_not_change_the_total() {
    // 2.5 real seconds at 36x = 90 game seconds, no matter the slicing.
    let slicings: [&[u64]; 3] = [&[2_500], &[1, 999, 1_500], &[333, 333, 334, 1_500]];
    for slices in slicings {
        let mut clock = SimClock::new(&config(36.0, 600)).unwrap();
        for &ms in slices {
            clock.advance(Duration::from_millis(ms));
        }
        assert_eq!(clock.now_game_seconds(), 90, "{slices:?}");
    }
}

#[test]
fn every_tick_is_reported_exactly_once() {
    let mut clock = SimClock::new(&config(100.0, 60)).unwrap();
    let mut seen = Vec::new();
    for ms in [10_u64, 700, 3, 5_000, 1, 12_000] {
        clock.advance_with(Duration::from_millis(ms), |tick, at| seen.push((tick, at)));
    }

    let total = clock.now_game_seconds();
    let expected: Vec<(u64, i64)> = (1..=clock.tick_count())
        .zip((1_i64..).map(|k| k.saturating_mul(60)))
        .collect();
    assert_eq!(seen, expected);
    assert_eq!(clock.tick_count(), u64::try_from(total.checked_div(60).unwrap()).unwrap());
}

#[test]
fn readers_on_other_threads_see_updates() {
    let mut clock = SimClock::new(&config(86_400.0, 3_600)).unwrap();
    let reader = clock.reader();

    clock.advance(Duration::from_secs(2));

    let handle = thread::spawn(move || {
        (
            reader.now_game_seconds(),
            reader.tick_count(),
            reader.now_calendar_string(),
        )
    });
    let (secs, ticks, gst) = handle.join().unwrap();
    assert_eq!(secs, days_to_seconds(2));
    assert_eq!(ticks, 48);
    assert_eq!(gst, "GST 2350-01-03 00:00");
    assert_eq!(format_duration(secs), "2d");
}

#[test]
fn snapshots_never_show_ticks_ahead_of_seconds() {
    let step = 60_i64;
    let mut clock = SimClock::new(&config(1_000.0, step)).unwrap();
    let reader = clock.reader();

    let writer = thread::spawn(move || {
        for _ in 0..20_000 {
            clock.advance(Duration::from_millis(7));
        }
        clock.tick_count()
    });

    let mut last = reader.snapshot();
    while !writer.is_finished() {
        let snap = reader.snapshot();
        let ticked = i64::try_from(snap.tick_count).unwrap().saturating_mul(step);
        assert!(ticked <= snap.game_seconds, "{snap:?}");
        assert!(snap.game_seconds >= last.game_seconds);
        assert!(snap.tick_count >= last.tick_count);
        last = snap;
    }

    let final_ticks = writer.join().unwrap();
    assert_eq!(reader.snapshot().tick_count, final_ticks);
    // 140 real seconds at 1000x.
    assert_eq!(reader.snapshot().game_seconds, 140_000);
}
