//! Per-frame simulation step
//!
//! [`tick`] advances the whole game by exactly one 60 Hz frame. The host
//! drives it from its own frame loop; nothing in here reads a clock or
//! touches the platform.

use crate::consts::*;

use super::collision::{eagle_box, pigeon_box, player_box_vs_eagle, player_box_vs_pigeon};
use super::player::{self, PlayerOutcome};
use super::spawn;
use super::state::{EaglePhase, GameEvent, GamePhase, GameState};

/// Input sampled by the host for one frame.
///
/// `jump` carries the wall-clock timestamp (ms) of a press that happened
/// since the previous frame; the host clears it after each consumed tick so
/// one press never triggers twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub jump: Option<f64>,
    pub left: bool,
    pub right: bool,
    pub crouch: bool,
}

/// Advance the game by one frame.
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::GameOver => {}
        GamePhase::Countdown => tick_countdown(state),
        GamePhase::Running => tick_running(state, input),
    }
}

fn tick_countdown(state: &mut GameState) {
    state.countdown_timer += 1;
    if state.countdown_timer < COUNTDOWN_INTERVAL_FRAMES {
        return;
    }
    state.countdown_timer = 0;
    state.countdown -= 1;
    if state.countdown == 0 {
        state.phase = GamePhase::Running;
        log::info!("countdown finished, run started (seed {})", state.seed);
    }
}

fn tick_running(state: &mut GameState, input: &TickInput) {
    state.time_frames += 1;
    state.track.advance();

    let outcome = player::update_player(
        &mut state.player,
        &state.track,
        &state.layout,
        input,
        &mut state.events,
    );
    if outcome == PlayerOutcome::Fell {
        log::info!("fell through a gap at x={:.0}", state.player.pos.x);
        game_over(state);
        return;
    }

    update_pigeons(state);
    if update_eagles(state) {
        log::info!("hit by an eagle");
        game_over(state);
        return;
    }
    update_pops(state);
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver);
    log::info!(
        "game over: score {} ({} caught, {} dodged, {} frames)",
        state.score,
        state.pigeons_caught,
        state.eagles_dodged,
        state.time_frames
    );
}

fn update_pigeons(state: &mut GameState) {
    spawn::spawn_pigeons(state);

    let player_box = player_box_vs_pigeon(&state.player, &state.layout);
    let mut caught = Vec::new();

    state.pigeons.retain_mut(|p| {
        p.pos.x += p.vel_x;
        p.frame_timer += 1;
        if p.frame_timer >= PIGEON_FRAME_DELAY {
            p.frame_timer = 0;
            p.frame_index = (p.frame_index + 1) % PIGEON_FRAMES;
        }

        if player_box.overlaps(&pigeon_box(p)) {
            caught.push(pigeon_box(p).center());
            return false;
        }
        p.pos.x >= -PIGEON_SIZE
    });

    for center in caught {
        state.score += SCORE_CATCH;
        state.pigeons_caught += 1;
        state.push_pop(center, SCORE_CATCH);
        state.events.push(GameEvent::Catch);
    }
}

/// Returns true when an active eagle hit the player this frame.
fn update_eagles(state: &mut GameState) -> bool {
    spawn::spawn_eagles(state);

    let player_box = player_box_vs_eagle(&state.player, &state.layout);
    let mut hit = false;
    let mut dodged = 0u32;

    state.eagles.retain_mut(|e| {
        match &mut e.phase {
            EaglePhase::Warning { frames_left } => {
                // Stationary and harmless until the warning runs out
                *frames_left -= 1;
                if *frames_left == 0 {
                    e.phase = EaglePhase::Active;
                }
                return true;
            }
            EaglePhase::Active => {
                e.pos.x += e.vel_x;
                e.frame_timer += 1;
                if e.frame_timer >= EAGLE_FRAME_DELAY {
                    e.frame_timer = 0;
                    e.frame_index = (e.frame_index + 1) % EAGLE_FRAMES;
                }
            }
        }

        if player_box.overlaps(&eagle_box(e)) {
            hit = true;
            return true;
        }
        if e.pos.x < -EAGLE_SIZE - EAGLE_DESPAWN_MARGIN {
            dodged += 1;
            return false;
        }
        true
    });

    for _ in 0..dodged {
        state.score += SCORE_DODGE;
        state.eagles_dodged += 1;
        state.events.push(GameEvent::Dodge);
    }

    hit
}

fn update_pops(state: &mut GameState) {
    state.pops.retain_mut(|pop| {
        pop.pos.y += SCORE_POP_RISE;
        pop.age += 1;
        pop.age < SCORE_POP_LIFETIME
    });
}
