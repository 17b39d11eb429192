//! Gate network queries: `gates`, `route`, `nearby`.

use std::sync::Arc;

use starlane_types::LocationId;
use starlane_world::WorldRegistry;

use crate::router::{Command, CommandResult, CommandRouter, Context, ErrorCode, RegistrationError};

/// Register the routing verbs, all bound to `world`.
///
/// # Errors
///
/// Returns [`RegistrationError`] if any verb is already registered.
pub fn register_routing_commands(
    router: &mut CommandRouter,
    world: &Arc<WorldRegistry>,
) -> Result<(), RegistrationError> {
    let w = Arc::clone(world);
    router.add("gates", move |_: &Context, cmd: &Command| gates(&w, cmd))?;

    let w = Arc::clone(world);
    router.add("route", move |_: &Context, cmd: &Command| route(&w, cmd))?;

    let w = Arc::clone(world);
    router.add("nearby", move |_: &Context, cmd: &Command| nearby(&w, cmd))?;

    Ok(())
}

/// Resolve a location name, or produce the `unknown_system` failure.
pub(crate) fn resolve(world: &WorldRegistry, name: &str) -> Result<LocationId, CommandResult> {
    world.find_by_name(name).ok_or_else(|| {
        CommandResult::failure(ErrorCode::UnknownSystem, format!("Unknown system: {name}"))
    })
}

/// Join output lines, each terminated by a newline.
pub(crate) fn render(lines: &[String]) -> String {
    lines.iter().fold(String::new(), |mut out, line| {
        out.push_str(line);
        out.push('\n');
        out
    })
}

fn gates(world: &WorldRegistry, cmd: &Command) -> CommandResult {
    let [name] = cmd.args.as_slice() else {
        return CommandResult::failure(ErrorCode::Usage, "Usage: gates <system>");
    };
    let id = match resolve(world, name) {
        Ok(id) => id,
        Err(failure) => return failure,
    };

    let names: Vec<String> = world
        .gates()
        .neighbors(id)
        .iter()
        .map(|&n| world.display_name(n))
        .collect();

    let mut text = vec![format!("Gates from {name}:")];
    text.extend(names.iter().map(|n| format!("  - {n}")));
    CommandResult::success(render(&text)).with_lines(names)
}

fn route(world: &WorldRegistry, cmd: &Command) -> CommandResult {
    let [from, to] = cmd.args.as_slice() else {
        return CommandResult::failure(ErrorCode::Usage, "Usage: route <from> <to>");
    };
    let (a, b) = match (resolve(world, from), resolve(world, to)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(failure), _) | (_, Err(failure)) => return failure,
    };

    let Some(found) = world.gates().shortest_route(a, b) else {
        return CommandResult::failure(ErrorCode::NoRoute, "No route found.");
    };

    let names: Vec<String> = found.path.iter().map(|&id| world.display_name(id)).collect();

    let mut text = vec![
        format!("Route: {from} -> {to}"),
        format!("Jumps: {}", found.jumps),
        String::from("Path:"),
    ];
    text.extend(
        names
            .iter()
            .zip(1_usize..)
            .map(|(n, step)| format!("  {step}) {n}")),
    );
    CommandResult::success(render(&text)).with_lines(names)
}

fn nearby(world: &WorldRegistry, cmd: &Command) -> CommandResult {
    let [name, raw_n] = cmd.args.as_slice() else {
        return CommandResult::failure(ErrorCode::Usage, "Usage: nearby <system> <N>");
    };
    let id = match resolve(world, name) {
        Ok(id) => id,
        Err(failure) => return failure,
    };
    let Ok(n) = raw_n.parse::<i32>() else {
        return CommandResult::failure(ErrorCode::BadNumber, "N must be a number.");
    };

    let names: Vec<String> = world
        .gates()
        .within(id, n, false)
        .into_iter()
        .map(|found| world.display_name(found))
        .collect();

    let mut text = vec![format!("Systems within {n} jumps of {name}:")];
    text.extend(names.iter().map(|found| format!("  - {found}")));
    CommandResult::success(render(&text)).with_lines(names)
}
