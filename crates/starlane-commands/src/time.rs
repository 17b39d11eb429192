//! Game time verbs: `time`, `duration`, `when`.

use starlane_core::calendar::format_duration;
use starlane_core::clock::ClockReader;

use crate::router::{Command, CommandResult, CommandRouter, Context, ErrorCode, RegistrationError};
use crate::routing::render;

/// Register the time verbs, bound to a read handle of the game clock.
///
/// # Errors
///
/// Returns [`RegistrationError`] if any verb is already registered.
pub fn register_time_commands(
    router: &mut CommandRouter,
    clock: &ClockReader,
) -> Result<(), RegistrationError> {
    let c = clock.clone();
    router.add("time", move |_: &Context, cmd: &Command| time(&c, cmd))?;

    router.add("duration", |_: &Context, cmd: &Command| duration(cmd))?;

    let c = clock.clone();
    router.add("when", move |_: &Context, cmd: &Command| when(&c, cmd))?;

    Ok(())
}

/// Parse a non-negative whole number of seconds.
fn parse_seconds(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|secs| *secs >= 0)
}

fn invalid_seconds() -> CommandResult {
    CommandResult::failure(ErrorCode::BadInput, "Invalid seconds value.")
}

fn time(clock: &ClockReader, cmd: &Command) -> CommandResult {
    if !cmd.args.is_empty() {
        return CommandResult::failure(ErrorCode::Usage, "Usage: time");
    }

    let config = clock.config();
    let now = clock.snapshot();
    let calendar = clock.calendar_or_offset(now.game_seconds);
    let text = render(&[
        format!("Time: {calendar}"),
        format!("GameSeconds: {}", now.game_seconds),
        format!("Ticks: {}", now.tick_count),
        format!("Scale: {} game sec / real sec", config.game_seconds_per_real_second),
        format!("TickStep: {} game sec", config.tick_step_game_seconds),
    ]);
    CommandResult::success(text).with_lines(vec![calendar])
}

fn duration(cmd: &Command) -> CommandResult {
    let [raw] = cmd.args.as_slice() else {
        return CommandResult::failure(ErrorCode::Usage, "Usage: duration <seconds>");
    };
    let Some(secs) = parse_seconds(raw) else {
        return invalid_seconds();
    };

    let span = format_duration(secs);
    CommandResult::success(format!("Duration: {span}\nSeconds: {secs}")).with_lines(vec![span])
}

fn when(clock: &ClockReader, cmd: &Command) -> CommandResult {
    let [raw] = cmd.args.as_slice() else {
        return CommandResult::failure(ErrorCode::Usage, "Usage: when <seconds>");
    };
    let Some(secs) = parse_seconds(raw) else {
        return invalid_seconds();
    };

    let now = clock.now_game_seconds();
    let then = match now.checked_add(secs).map(|at| clock.calendar_at(at)) {
        Some(Ok(then)) => then,
        Some(Err(_)) | None => {
            return CommandResult::failure(ErrorCode::BadInput, "Time is beyond the calendar.");
        }
    };
    let span = format_duration(secs);

    let text = format!(
        "Now:  {}\nThen: {then}\nIn:   {span}",
        clock.calendar_or_offset(now)
    );
    CommandResult::success(text).with_lines(vec![then, span])
}
