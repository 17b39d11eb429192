//! Galactic Standard Time calendar and duration formatting.
//!
//! Game time is a count of seconds since the configured start date at
//! midnight. The calendar is proleptic Gregorian (no leap seconds), which is
//! exactly what [`chrono::NaiveDate`] implements, and display is truncated
//! to whole minutes: `GST 2350-01-03 12:40`.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::clock::ClockError;
use crate::config::TimeConfig;

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Convert whole days to seconds, saturating on overflow.
pub const fn days_to_seconds(days: i64) -> i64 {
    days.saturating_mul(SECONDS_PER_DAY)
}

/// Convert whole hours to seconds, saturating on overflow.
pub const fn hours_to_seconds(hours: i64) -> i64 {
    hours.saturating_mul(SECONDS_PER_HOUR)
}

/// Convert whole minutes to seconds, saturating on overflow.
pub const fn minutes_to_seconds(minutes: i64) -> i64 {
    minutes.saturating_mul(SECONDS_PER_MINUTE)
}

/// Midnight of the configured start date.
///
/// # Errors
///
/// Returns [`ClockError::InvalidConfig`] if the date does not exist.
pub fn start_datetime(config: &TimeConfig) -> Result<NaiveDateTime, ClockError> {
    NaiveDate::from_ymd_opt(config.start_year, config.start_month, config.start_day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ClockError::InvalidConfig {
            reason: format!(
                "start date {}-{:02}-{:02} does not exist",
                config.start_year, config.start_month, config.start_day
            ),
        })
}

/// Format `seconds` after `start` as a GST timestamp.
///
/// # Errors
///
/// Returns [`ClockError::CalendarOutOfRange`] if the instant cannot be
/// represented.
pub fn format_from(start: NaiveDateTime, seconds: i64) -> Result<String, ClockError> {
    let at = TimeDelta::try_seconds(seconds)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or(ClockError::CalendarOutOfRange { seconds })?;
    Ok(at.format("GST %Y-%m-%d %H:%M").to_string())
}

/// Format `seconds` since the configured start as a GST timestamp.
///
/// # Errors
///
/// Returns [`ClockError::InvalidConfig`] for an impossible start date and
/// [`ClockError::CalendarOutOfRange`] for an unrepresentable instant.
pub fn format_calendar(config: &TimeConfig, seconds: i64) -> Result<String, ClockError> {
    format_from(start_datetime(config)?, seconds)
}

/// Render a span of seconds as `1d 2h 3m 4s`, skipping zero components.
///
/// Zero and negative spans render as `0s`.
pub fn format_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return String::from("0s");
    }

    let days = seconds.checked_div(SECONDS_PER_DAY).unwrap_or(0);
    let hours = seconds
        .checked_rem(SECONDS_PER_DAY)
        .and_then(|rest| rest.checked_div(SECONDS_PER_HOUR))
        .unwrap_or(0);
    let minutes = seconds
        .checked_rem(SECONDS_PER_HOUR)
        .and_then(|rest| rest.checked_div(SECONDS_PER_MINUTE))
        .unwrap_or(0);
    let secs = seconds.checked_rem(SECONDS_PER_MINUTE).unwrap_or(0);

    [(days, "d"), (hours, "h"), (minutes, "m"), (secs, "s")]
        .into_iter()
        .filter(|&(value, _)| value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect::<Vec<_>>()
        .join(" ")
}
