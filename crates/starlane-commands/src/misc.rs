//! Random sampling verbs: `random_system`, `random_route`.
//!
//! Both verbs share one random number generator. Pass a seeded
//! [`StdRng`] for reproducible output, or one from
//! [`StdRng::from_os_rng`](rand::SeedableRng::from_os_rng) for play.

use std::sync::{Arc, Mutex, PoisonError};

use rand::Rng;
use rand::rngs::StdRng;
use starlane_types::LocationId;
use starlane_world::WorldRegistry;

use crate::router::{Command, CommandResult, CommandRouter, Context, ErrorCode, RegistrationError};
use crate::routing::render;

/// Most routes a single `random_route` call will list.
pub const MAX_RANDOM_ROUTES: i64 = 20;

/// Sampling attempts allowed per requested route.
const ATTEMPTS_PER_ROUTE: i64 = 10;

/// Register the random sampling verbs.
///
/// # Errors
///
/// Returns [`RegistrationError`] if any verb is already registered.
pub fn register_misc_commands(
    router: &mut CommandRouter,
    world: &Arc<WorldRegistry>,
    rng: StdRng,
) -> Result<(), RegistrationError> {
    let rng = Arc::new(Mutex::new(rng));

    let w = Arc::clone(world);
    let r = Arc::clone(&rng);
    router.add("random_system", move |_: &Context, cmd: &Command| {
        random_system(&w, &r, cmd)
    })?;

    let w = Arc::clone(world);
    router.add("random_route", move |_: &Context, cmd: &Command| {
        random_route(&w, &rng, cmd)
    })?;

    Ok(())
}

/// Pick a uniformly random element of `ids`.
fn pick(rng: &mut StdRng, ids: &[LocationId]) -> Option<LocationId> {
    if ids.is_empty() {
        return None;
    }
    ids.get(rng.random_range(0..ids.len())).copied()
}

fn random_system(world: &WorldRegistry, rng: &Mutex<StdRng>, cmd: &Command) -> CommandResult {
    if !cmd.args.is_empty() {
        return CommandResult::failure(ErrorCode::Usage, "Usage: random_system");
    }

    let ids = world.location_ids();
    let picked = {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick(&mut rng, &ids)
    };
    let Some(location) = picked.and_then(|id| world.get_location(id)) else {
        return CommandResult::failure(ErrorCode::EmptyUniverse, "Universe has no systems.");
    };

    let text = render(&[
        format!("Random system: {} (#{})", location.name, location.id),
        format!("Tip: gates {}", location.name),
    ]);
    CommandResult::success(text).with_lines(vec![location.name.clone()])
}

fn random_route(world: &WorldRegistry, rng: &Mutex<StdRng>, cmd: &Command) -> CommandResult {
    let [raw_count] = cmd.args.as_slice() else {
        return CommandResult::failure(ErrorCode::Usage, "Usage: random_route <count>");
    };
    let Ok(count) = raw_count.parse::<i64>() else {
        return CommandResult::failure(ErrorCode::BadCount, "count must be a number.");
    };
    if count <= 0 {
        return CommandResult::failure(ErrorCode::BadCount, "count must be >= 1.");
    }
    let count = count.min(MAX_RANDOM_ROUTES);

    let ids = world.location_ids();
    if ids.len() < 2 {
        return CommandResult::failure(ErrorCode::EmptyUniverse, "Need at least 2 systems.");
    }

    let max_attempts = count.saturating_mul(ATTEMPTS_PER_ROUTE);
    let mut rows = Vec::new();
    let mut made: i64 = 0;
    let mut attempts: i64 = 0;
    {
        let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
        while made < count && attempts < max_attempts {
            attempts = attempts.saturating_add(1);
            let (Some(a), Some(b)) = (pick(&mut rng, &ids), pick(&mut rng, &ids)) else {
                continue;
            };
            if a == b {
                continue;
            }
            let Some(found) = world.gates().shortest_route(a, b) else {
                continue;
            };
            rows.push(format!(
                "{} -> {} : {} jumps",
                world.display_name(a),
                world.display_name(b),
                found.jumps
            ));
            made = made.saturating_add(1);
        }
    }

    if rows.is_empty() {
        return CommandResult::failure(
            ErrorCode::Internal,
            "Could not generate routes (unexpected).",
        );
    }

    let mut text = vec![String::from("Random routes:")];
    text.extend(rows.iter().map(|row| format!("  - {row}")));
    CommandResult::success(render(&text)).with_lines(rows)
}
