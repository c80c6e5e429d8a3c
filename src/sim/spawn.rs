//! Entity spawning
//!
//! Both spawners run on frame-counted timers while the game is running.
//! Pigeons appear at a seeded random altitude high enough that only the
//! upper jump stages reach them. Eagles start in a stationary warning phase
//! at the spawn point and only become lethal (and mobile) once the warning
//! expires; the first few stay in a narrow high band before the altitude
//! range opens up to roof level.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::state::{Eagle, EaglePhase, GameState, Pigeon};

/// Advance the pigeon spawn timer, emitting a new pigeon when it elapses.
pub fn spawn_pigeons(state: &mut GameState) {
    state.spawn.pigeon_timer += 1;
    if state.spawn.pigeon_timer < PIGEON_SPAWN_INTERVAL {
        return;
    }
    state.spawn.pigeon_timer = 0;

    let y = state
        .rng
        .random_range(PIGEON_MIN_Y..=state.layout.pigeon_max_y());
    state.pigeons.push(Pigeon {
        pos: Vec2::new(state.layout.screen_w, y),
        vel_x: PIGEON_SPEED,
        frame_index: 0,
        frame_timer: 0,
    });
    log::debug!("pigeon spawned at y={y:.1}");
}

/// Advance the eagle spawn timer, emitting a warning-phase eagle when it
/// elapses. The spawn count is monotonic and drives the difficulty ramp.
pub fn spawn_eagles(state: &mut GameState) {
    state.spawn.eagle_timer += 1;
    if state.spawn.eagle_timer < EAGLE_SPAWN_INTERVAL {
        return;
    }
    state.spawn.eagle_timer = 0;
    state.spawn.eagles_spawned += 1;

    let (min_y, max_y) = if state.spawn.eagles_spawned <= EAGLE_EASY_SPAWNS {
        (EAGLE_EASY_MIN_Y, EAGLE_EASY_MAX_Y)
    } else {
        (EAGLE_EASY_MIN_Y, state.layout.ground_y())
    };
    let y = state.rng.random_range(min_y..=max_y);

    state.eagles.push(Eagle {
        pos: Vec2::new(state.layout.screen_w + EAGLE_SPAWN_LEAD, y),
        vel_x: -EAGLE_SPEED,
        phase: EaglePhase::Warning {
            frames_left: EAGLE_WARNING_FRAMES,
        },
        frame_index: 0,
        frame_timer: 0,
    });
    log::debug!(
        "eagle #{} spawned at y={y:.1}",
        state.spawn.eagles_spawned
    );
}
