//! Player physics and control
//!
//! Gravity integrates every frame regardless of grounding. The jump is a
//! three-stage escalation: the first grounded press applies the low impulse
//! immediately, and each further press within the chain window replaces the
//! vertical velocity with the next stronger impulse. The window uses the
//! wall-clock timestamps carried on the input so it behaves the same at any
//! frame rate; the sim itself never reads a clock.

use crate::consts::*;

use super::state::{AnimState, GameEvent, Player, WorldLayout};
use super::tick::TickInput;
use super::track::Track;

/// Outcome of one player update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerOutcome {
    Alive,
    /// Fell past the buffer below the roof line while over a gap
    Fell,
}

/// Apply one jump press (edge event) stamped with its wall-clock time.
///
/// Grounded press: low jump, stage 1. Repeat presses within the chain
/// window escalate stage 1 -> 2 -> 3 with stronger impulses. Anything else
/// is ignored; the stage only resets on landing.
pub fn apply_jump_press(player: &mut Player, now_ms: f64, events: &mut Vec<GameEvent>) {
    let since_last = now_ms - player.last_jump_press_ms;

    if !player.airborne {
        player.vel_y = JUMP_LOW;
        player.airborne = true;
        player.jump_stage = 1;
        player.last_jump_press_ms = now_ms;
        events.push(GameEvent::Jump);
    } else if player.jump_stage == 1 && since_last < JUMP_CHAIN_WINDOW_MS {
        player.vel_y = JUMP_NORMAL;
        player.jump_stage = 2;
        player.last_jump_press_ms = now_ms;
        events.push(GameEvent::Jump);
    } else if player.jump_stage == 2 && since_last < JUMP_CHAIN_WINDOW_MS {
        player.vel_y = JUMP_HIGH;
        player.jump_stage = 3;
        player.last_jump_press_ms = now_ms;
        events.push(GameEvent::Jump);
    }
}

/// Advance the player by one frame: input, gravity, grounding, movement,
/// animation. Returns [`PlayerOutcome::Fell`] when the gap-fall buffer is
/// exceeded.
pub fn update_player(
    player: &mut Player,
    track: &Track,
    layout: &WorldLayout,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) -> PlayerOutcome {
    player.crouching = input.crouch;

    if let Some(press_ms) = input.jump {
        apply_jump_press(player, press_ms, events);
    }

    // Gravity integrates unconditionally
    player.vel_y += GRAVITY;
    player.pos.y += player.vel_y;

    let center_x = player.pos.x + layout.cat_w / 2.0;
    let ground_y = layout.ground_y();

    if track.is_solid_at(center_x) {
        if player.pos.y >= ground_y {
            // Landed: snap to the roof and reset the jump chain
            player.pos.y = ground_y;
            player.vel_y = 0.0;
            player.airborne = false;
            player.jump_stage = 0;
        }
    } else {
        // Over a gap: no surface to land on, and no fresh jumps
        player.airborne = true;
        if player.pos.y >= ground_y + FALL_BUFFER {
            return PlayerOutcome::Fell;
        }
    }

    player.anim = if player.airborne || input.left || input.right {
        AnimState::Run
    } else {
        AnimState::Idle
    };

    if input.left {
        player.pos.x -= RUN_SPEED;
        player.facing_left = true;
    }
    if input.right {
        player.pos.x += RUN_SPEED;
        player.facing_left = false;
    }
    player.pos.x = player.pos.x.clamp(0.0, layout.screen_w - layout.cat_w);

    player.frame_timer += 1;
    if player.frame_timer >= CAT_FRAME_DELAY {
        player.frame_timer = 0;
        player.frame_index = (player.frame_index + 1) % player.anim.frame_count();
    }

    PlayerOutcome::Alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;

    fn setup() -> (Player, Track, WorldLayout) {
        let layout = WorldLayout::default();
        let state = GameState::new(0, layout.clone());
        (state.player, state.track, layout)
    }

    fn idle_input() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_first_press_gives_low_impulse() {
        let (mut p, _, _) = setup();
        let mut events = Vec::new();
        apply_jump_press(&mut p, 1000.0, &mut events);
        assert_eq!(p.vel_y, JUMP_LOW);
        assert_eq!(p.jump_stage, 1);
        assert!(p.airborne);
        assert_eq!(events, vec![GameEvent::Jump]);
    }

    #[test]
    fn test_chain_escalates_within_window() {
        let (mut p, _, _) = setup();
        let mut events = Vec::new();
        apply_jump_press(&mut p, 1000.0, &mut events);
        apply_jump_press(&mut p, 1150.0, &mut events);
        assert_eq!(p.vel_y, JUMP_NORMAL);
        assert_eq!(p.jump_stage, 2);
        apply_jump_press(&mut p, 1299.0, &mut events);
        assert_eq!(p.vel_y, JUMP_HIGH);
        assert_eq!(p.jump_stage, 3);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_press_outside_window_is_ignored() {
        let (mut p, _, _) = setup();
        let mut events = Vec::new();
        apply_jump_press(&mut p, 1000.0, &mut events);
        // 300ms window is exclusive; exactly at it, and later, must not escalate
        apply_jump_press(&mut p, 1300.0, &mut events);
        assert_eq!(p.jump_stage, 1);
        assert_eq!(p.vel_y, JUMP_LOW);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_fourth_press_is_ignored() {
        let (mut p, _, _) = setup();
        let mut events = Vec::new();
        apply_jump_press(&mut p, 0.0, &mut events);
        apply_jump_press(&mut p, 100.0, &mut events);
        apply_jump_press(&mut p, 200.0, &mut events);
        apply_jump_press(&mut p, 250.0, &mut events);
        assert_eq!(p.jump_stage, 3);
        assert_eq!(p.vel_y, JUMP_HIGH);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_airborne_stage_zero_press_is_noop() {
        let (mut p, _, _) = setup();
        // Walked off an edge: airborne without having jumped
        p.airborne = true;
        p.jump_stage = 0;
        let mut events = Vec::new();
        apply_jump_press(&mut p, 1000.0, &mut events);
        assert_eq!(p.jump_stage, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_landing_resets_stage_and_allows_new_jump() {
        let (mut p, track, layout) = setup();
        let mut events = Vec::new();
        apply_jump_press(&mut p, 0.0, &mut events);

        // Integrate until the arc comes back down to the roof
        let input = idle_input();
        for _ in 0..200 {
            if !p.airborne {
                break;
            }
            update_player(&mut p, &track, &layout, &input, &mut events);
        }
        assert!(!p.airborne, "player never landed");
        assert_eq!(p.jump_stage, 0);
        assert_eq!(p.pos.y, layout.ground_y());
        assert_eq!(p.vel_y, 0.0);

        // A fresh press long after the old window works again
        apply_jump_press(&mut p, 10_000.0, &mut events);
        assert_eq!(p.jump_stage, 1);
    }

    #[test]
    fn test_gravity_pulls_down_every_frame() {
        let (mut p, track, layout) = setup();
        let mut events = Vec::new();
        apply_jump_press(&mut p, 0.0, &mut events);
        let input = idle_input();
        update_player(&mut p, &track, &layout, &input, &mut events);
        let v1 = p.vel_y;
        update_player(&mut p, &track, &layout, &input, &mut events);
        assert_eq!(p.vel_y, v1 + GRAVITY);
        assert!(p.pos.y < layout.ground_y());
    }

    #[test]
    fn test_fall_through_gap_past_buffer() {
        let (mut p, mut track, layout) = setup();
        // Park the player over the first inter-car gap
        p.pos.x = layout.end_w + CAR_GAP / 2.0 - layout.cat_w / 2.0;
        track.show_lead_car = false;
        // Make sure the chosen x really is a gap
        assert!(!track.is_solid_at(p.pos.x + layout.cat_w / 2.0));

        let input = idle_input();
        let mut events = Vec::new();
        let mut fell = false;
        for _ in 0..600 {
            if update_player(&mut p, &track, &layout, &input, &mut events) == PlayerOutcome::Fell {
                fell = true;
                break;
            }
        }
        assert!(fell, "gap fall never triggered");
        assert!(p.pos.y >= layout.ground_y() + FALL_BUFFER);
    }

    #[test]
    fn test_small_dip_over_gap_does_not_kill() {
        let (mut p, mut track, layout) = setup();
        track.show_lead_car = false;
        p.pos.x = layout.end_w + CAR_GAP / 2.0 - layout.cat_w / 2.0;
        p.pos.y = layout.ground_y() + 5.0;
        p.vel_y = 0.0;
        p.airborne = true;

        let input = idle_input();
        let mut events = Vec::new();
        // A single frame only dips a little further; still inside the buffer
        let outcome = update_player(&mut p, &track, &layout, &input, &mut events);
        assert_eq!(outcome, PlayerOutcome::Alive);
    }

    #[test]
    fn test_horizontal_movement_and_facing() {
        let (mut p, track, layout) = setup();
        let mut events = Vec::new();
        let mut input = idle_input();
        input.left = true;
        let x0 = p.pos.x;
        update_player(&mut p, &track, &layout, &input, &mut events);
        assert_eq!(p.pos.x, x0 - RUN_SPEED);
        assert!(p.facing_left);
        assert_eq!(p.anim, AnimState::Run);

        input.left = false;
        input.right = true;
        update_player(&mut p, &track, &layout, &input, &mut events);
        assert!(!p.facing_left);
    }

    #[test]
    fn test_clamped_to_screen() {
        let (mut p, track, layout) = setup();
        let mut events = Vec::new();
        let mut input = idle_input();
        input.left = true;
        p.pos.x = 1.0;
        update_player(&mut p, &track, &layout, &input, &mut events);
        assert_eq!(p.pos.x, 0.0);

        input.left = false;
        input.right = true;
        p.pos.x = layout.screen_w - layout.cat_w - 1.0;
        update_player(&mut p, &track, &layout, &input, &mut events);
        assert_eq!(p.pos.x, layout.screen_w - layout.cat_w);
    }

    #[test]
    fn test_idle_animation_wraps_at_twelve() {
        let (mut p, track, layout) = setup();
        let mut events = Vec::new();
        let input = idle_input();
        // Enough frames to advance the idle strip through a full cycle
        for _ in 0..(CAT_FRAME_DELAY * CAT_IDLE_FRAMES) {
            update_player(&mut p, &track, &layout, &input, &mut events);
            assert!(p.frame_index < CAT_IDLE_FRAMES);
            assert_eq!(p.anim, AnimState::Idle);
        }
        assert_eq!(p.frame_index, 0);
    }

    #[test]
    fn test_run_animation_wraps_at_six() {
        let (mut p, track, layout) = setup();
        let mut events = Vec::new();
        let mut input = idle_input();
        input.right = true;
        for _ in 0..(CAT_FRAME_DELAY * CAT_RUN_FRAMES * 3) {
            update_player(&mut p, &track, &layout, &input, &mut events);
            assert!(p.frame_index < CAT_RUN_FRAMES);
        }
    }
}
