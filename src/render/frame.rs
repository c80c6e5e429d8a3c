//! Draw-command construction
//!
//! One [`build_frame`] call produces the full back-to-front command list
//! for a frame. Train sprites are placed from the same span enumeration the
//! surface query uses, so what the player stands on and what the screen
//! shows can never disagree.

use std::f32::consts::TAU;

use crate::assets::SpriteMetrics;
use crate::consts::*;
use crate::cover_fit;
use crate::sim::{EaglePhase, GamePhase, GameState, SpanKind};

/// Which loaded sprite sheet a command samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetId {
    Background,
    TrainCar,
    TrainEnd,
    CatIdle,
    CatRun,
    Pigeon,
    Eagle,
}

/// A single draw operation, already resolved to screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole canvas with the sky color
    Clear,
    /// Blit a source rectangle of a sheet to a destination rectangle
    Sprite {
        sheet: SheetId,
        src: (f32, f32, f32, f32),
        dst: (f32, f32, f32, f32),
        flip_x: bool,
        alpha: f32,
    },
    /// Full-screen dimming layer
    Overlay { alpha: f32 },
    /// Outlined text, centered on (x, y)
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        alpha: f32,
    },
}

/// Build the complete draw list for the current state.
///
/// `reduced_motion` holds the countdown at full size and the warning
/// marker at full opacity instead of pulsing/blinking them.
pub fn build_frame(
    state: &GameState,
    metrics: &SpriteMetrics,
    reduced_motion: bool,
) -> Vec<DrawCmd> {
    let layout = &state.layout;
    let mut cmds = vec![DrawCmd::Clear];

    // Background, cover-fit so any aspect ratio fills the screen
    let (bx, by, bw, bh) = cover_fit(
        metrics.background_w,
        metrics.background_h,
        layout.screen_w,
        layout.screen_h,
    );
    cmds.push(DrawCmd::Sprite {
        sheet: SheetId::Background,
        src: (0.0, 0.0, metrics.background_w, metrics.background_h),
        dst: (bx, by, bw, bh),
        flip_x: false,
        alpha: 1.0,
    });

    // Train, one sprite per solid span
    for span in state.track.spans() {
        let (sheet, src_w, src_h, h) = match span.kind {
            SpanKind::LeadCar => (
                SheetId::TrainEnd,
                metrics.train_end_w,
                metrics.train_end_h,
                layout.end_h,
            ),
            SpanKind::Car => (
                SheetId::TrainCar,
                metrics.train_car_w,
                metrics.train_car_h,
                layout.car_h,
            ),
        };
        cmds.push(DrawCmd::Sprite {
            sheet,
            src: (0.0, 0.0, src_w, src_h),
            dst: (span.start, layout.train_y, span.width, h),
            // The end-cap art faces right; the head of the train faces left
            flip_x: span.kind == SpanKind::LeadCar,
            alpha: 1.0,
        });
    }

    // Pigeons fly leftward, art faces right
    for p in &state.pigeons {
        cmds.push(DrawCmd::Sprite {
            sheet: SheetId::Pigeon,
            src: (
                p.frame_index as f32 * metrics.pigeon_frame_w,
                0.0,
                metrics.pigeon_frame_w,
                metrics.pigeon_frame_h,
            ),
            dst: (p.pos.x, p.pos.y, PIGEON_SIZE, PIGEON_SIZE),
            flip_x: true,
            alpha: 1.0,
        });
    }

    // Eagles: active ones are drawn, warning ones show a blinking marker at
    // the right edge at their incoming altitude
    for e in &state.eagles {
        match e.phase {
            EaglePhase::Active => {
                cmds.push(DrawCmd::Sprite {
                    sheet: SheetId::Eagle,
                    src: (
                        e.frame_index as f32 * metrics.eagle_frame_w,
                        0.0,
                        metrics.eagle_frame_w,
                        metrics.eagle_frame_h,
                    ),
                    dst: (e.pos.x, e.pos.y, EAGLE_SIZE, EAGLE_SIZE),
                    flip_x: false,
                    alpha: 1.0,
                });
            }
            EaglePhase::Warning { frames_left } => {
                let blink_on = reduced_motion || (frames_left / 10) % 2 == 0;
                cmds.push(DrawCmd::Text {
                    text: "!".into(),
                    x: layout.screen_w - 40.0,
                    y: e.pos.y + EAGLE_SIZE / 2.0,
                    size: 56.0,
                    alpha: if blink_on { 1.0 } else { 0.35 },
                });
            }
        }
    }

    // The cat
    let player = &state.player;
    let (sheet, frame_w, frame_h) = match player.anim {
        crate::sim::AnimState::Idle => {
            (SheetId::CatIdle, metrics.cat_frame_w, metrics.cat_frame_h)
        }
        crate::sim::AnimState::Run => (SheetId::CatRun, metrics.cat_frame_w, metrics.cat_frame_h),
    };
    let dst = if player.crouching && !player.airborne {
        (
            player.pos.x,
            player.pos.y + layout.cat_h / 2.0,
            layout.cat_w,
            layout.cat_h / 2.0,
        )
    } else {
        (player.pos.x, player.pos.y, layout.cat_w, layout.cat_h)
    };
    cmds.push(DrawCmd::Sprite {
        sheet,
        src: (
            player.frame_index as f32 * frame_w,
            0.0,
            frame_w,
            frame_h,
        ),
        dst,
        flip_x: player.facing_left,
        alpha: 1.0,
    });

    // Floating score texts
    for pop in &state.pops {
        cmds.push(DrawCmd::Text {
            text: pop.text.clone(),
            x: pop.pos.x,
            y: pop.pos.y,
            size: 28.0,
            alpha: pop.alpha(),
        });
    }

    match state.phase {
        GamePhase::Countdown => {
            // Pulse each number over its one-second slot
            let progress = state.countdown_timer as f32 / COUNTDOWN_INTERVAL_FRAMES as f32;
            let (scale, alpha) = if reduced_motion {
                (1.0, 1.0)
            } else {
                (1.0 + (progress * TAU).sin() * 0.2, 1.0 - 0.3 * progress)
            };
            cmds.push(DrawCmd::Text {
                text: state.countdown.to_string(),
                x: layout.screen_w / 2.0,
                y: layout.screen_h / 2.0,
                size: 96.0 * scale,
                alpha,
            });
        }
        GamePhase::GameOver => {
            cmds.push(DrawCmd::Overlay { alpha: 0.6 });
            cmds.push(DrawCmd::Text {
                text: "Game Over".into(),
                x: layout.screen_w / 2.0,
                y: layout.screen_h / 2.0 - 60.0,
                size: 72.0,
                alpha: 1.0,
            });
            cmds.push(DrawCmd::Text {
                text: format!("Score: {}", state.score),
                x: layout.screen_w / 2.0,
                y: layout.screen_h / 2.0 + 10.0,
                size: 42.0,
                alpha: 1.0,
            });
            cmds.push(DrawCmd::Text {
                text: "Press Restart to play again".into(),
                x: layout.screen_w / 2.0,
                y: layout.screen_h / 2.0 + 70.0,
                size: 26.0,
                alpha: 1.0,
            });
        }
        GamePhase::Running => {}
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TickInput, WorldLayout, tick};
    use proptest::prelude::*;

    fn metrics() -> SpriteMetrics {
        SpriteMetrics::default()
    }

    fn running_state() -> GameState {
        let mut s = GameState::new(3, WorldLayout::default());
        let input = TickInput::default();
        while s.phase == GamePhase::Countdown {
            tick(&mut s, &input);
        }
        s
    }

    /// All train sprites drawn this frame, as (start, end) x-ranges
    fn train_ranges(cmds: &[DrawCmd]) -> Vec<(f32, f32)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Sprite {
                    sheet: SheetId::TrainCar | SheetId::TrainEnd,
                    dst: (x, _, w, _),
                    ..
                } => Some((*x, *x + *w)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_frame_starts_with_clear_then_background() {
        let s = GameState::new(0, WorldLayout::default());
        let cmds = build_frame(&s, &metrics(), false);
        assert_eq!(cmds[0], DrawCmd::Clear);
        assert!(matches!(
            cmds[1],
            DrawCmd::Sprite {
                sheet: SheetId::Background,
                ..
            }
        ));
    }

    #[test]
    fn test_countdown_overlay_shows_number() {
        let s = GameState::new(0, WorldLayout::default());
        let cmds = build_frame(&s, &metrics(), false);
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == "3"
        )));
    }

    #[test]
    fn test_game_over_overlay_shows_score() {
        let mut s = running_state();
        s.score = 135;
        s.phase = GamePhase::GameOver;
        let cmds = build_frame(&s, &metrics(), false);
        assert!(cmds.iter().any(|c| matches!(c, DrawCmd::Overlay { .. })));
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == "Score: 135"
        )));
    }

    #[test]
    fn test_warning_eagle_draws_marker_not_sprite() {
        let mut s = running_state();
        s.eagles.push(crate::sim::Eagle {
            pos: glam::Vec2::new(1100.0, 150.0),
            vel_x: -EAGLE_SPEED,
            phase: EaglePhase::Warning { frames_left: 45 },
            frame_index: 0,
            frame_timer: 0,
        });
        let cmds = build_frame(&s, &metrics(), false);
        assert!(!cmds.iter().any(|c| matches!(
            c,
            DrawCmd::Sprite {
                sheet: SheetId::Eagle,
                ..
            }
        )));
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCmd::Text { text, .. } if text == "!"
        )));
    }

    #[test]
    fn test_crouch_draws_half_height() {
        let mut s = running_state();
        s.player.crouching = true;
        let cmds = build_frame(&s, &metrics(), false);
        let cat = cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::Sprite {
                    sheet: SheetId::CatIdle | SheetId::CatRun,
                    dst,
                    ..
                } => Some(*dst),
                _ => None,
            })
            .unwrap();
        assert_eq!(cat.3, s.layout.cat_h / 2.0);
        assert_eq!(cat.1, s.player.pos.y + s.layout.cat_h / 2.0);
    }

    #[test]
    fn test_cat_faces_left_when_mirrored() {
        let mut s = running_state();
        s.player.facing_left = true;
        let cmds = build_frame(&s, &metrics(), false);
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCmd::Sprite {
                sheet: SheetId::CatIdle | SheetId::CatRun,
                flip_x: true,
                ..
            }
        )));
    }

    #[test]
    fn test_reduced_motion_skips_pulse_and_blink() {
        // Quarter-interval countdown would normally be scaled and faded
        let mut s = GameState::new(0, WorldLayout::default());
        s.countdown_timer = 15;
        s.eagles.push(crate::sim::Eagle {
            pos: glam::Vec2::new(1100.0, 150.0),
            vel_x: -EAGLE_SPEED,
            // frames_left chosen so the blink would be in its dim phase
            phase: EaglePhase::Warning { frames_left: 15 },
            frame_index: 0,
            frame_timer: 0,
        });

        let cmds = build_frame(&s, &metrics(), true);
        let countdown = cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::Text { text, size, alpha, .. } if text == "3" => Some((*size, *alpha)),
                _ => None,
            })
            .unwrap();
        assert_eq!(countdown, (96.0, 1.0));

        let marker_alpha = cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::Text { text, alpha, .. } if text == "!" => Some(*alpha),
                _ => None,
            })
            .unwrap();
        assert_eq!(marker_alpha, 1.0);

        // Without the flag the same state dims and scales
        let cmds = build_frame(&s, &metrics(), false);
        let countdown = cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::Text { text, size, alpha, .. } if text == "3" => Some((*size, *alpha)),
                _ => None,
            })
            .unwrap();
        assert_ne!(countdown.0, 96.0);
        assert!(countdown.1 < 1.0);
        let marker_alpha = cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::Text { text, alpha, .. } if text == "!" => Some(*alpha),
                _ => None,
            })
            .unwrap();
        assert_eq!(marker_alpha, 0.35);
    }

    proptest! {
        /// The drawn train and the surface query must agree at every
        /// on-screen x, for any scroll position.
        #[test]
        fn prop_drawn_train_matches_surface(
            scroll in -50_000.0f32..0.0,
            lead in any::<bool>(),
        ) {
            let mut s = GameState::new(1, WorldLayout::default());
            s.track.scroll_x = scroll;
            s.track.show_lead_car = lead && scroll > -300.0;

            let cmds = build_frame(&s, &SpriteMetrics::default(), false);
            let ranges = train_ranges(&cmds);

            for xi in 0..1024u32 {
                let x = xi as f32;
                let drawn = ranges.iter().any(|(a, b)| x >= *a && x <= *b);
                prop_assert_eq!(
                    drawn,
                    s.track.is_solid_at(x),
                    "render/surface mismatch at x={} scroll={}",
                    x,
                    scroll
                );
            }
        }
    }
}
