//! Rail Cat - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `render`: Pure draw-command pass + canvas executor
//! - `assets`: Sprite sheet loading and frame metrics
//! - `audio`: Procedural sound effects
//! - `settings`: Persisted preferences

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// Velocities and accelerations are in pixels per frame at the fixed 60 Hz
/// step; timers are frame counts unless the name says otherwise.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the original frame timers)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Gravity added to vertical velocity every frame
    pub const GRAVITY: f32 = 0.5;
    /// Jump impulses by stage (upward is negative y)
    pub const JUMP_LOW: f32 = -9.0;
    pub const JUMP_NORMAL: f32 = -11.0;
    pub const JUMP_HIGH: f32 = -13.0;
    /// Wall-clock window for chaining jump presses into a higher stage
    pub const JUMP_CHAIN_WINDOW_MS: f64 = 300.0;
    /// Horizontal player speed
    pub const RUN_SPEED: f32 = 3.0;
    /// Falling this far below the roof line over a gap ends the run
    pub const FALL_BUFFER: f32 = 20.0;
    /// Player spawn x
    pub const PLAYER_START_X: f32 = 200.0;
    /// Fine-tune offset of the cat's feet relative to the roof line
    pub const PLAYER_OFFSET_Y: f32 = 10.0;

    /// Animation frame counts and pacing
    pub const CAT_IDLE_FRAMES: u32 = 12;
    pub const CAT_RUN_FRAMES: u32 = 6;
    pub const CAT_FRAME_DELAY: u32 = 6;

    /// Train scroll speed (pixels per frame, leftward)
    pub const SCROLL_SPEED: f32 = 2.0;
    /// Gap between train cars
    pub const CAR_GAP: f32 = 35.0;
    /// Cars per repeating unit of the track pattern
    pub const CARS_PER_UNIT: u32 = 3;

    /// Pigeon (collectible) tuning
    pub const PIGEON_SIZE: f32 = 32.0;
    pub const PIGEON_SPEED: f32 = -3.0;
    pub const PIGEON_SPAWN_INTERVAL: u32 = 120;
    pub const PIGEON_FRAMES: u32 = 7;
    pub const PIGEON_FRAME_DELAY: u32 = 5;
    /// Lowest pigeon spawn altitude
    pub const PIGEON_MIN_Y: f32 = 50.0;
    /// Pigeons spawn at least this far above the roof (high jumps only)
    pub const PIGEON_ROOF_CLEARANCE: f32 = 150.0;

    /// Eagle (attacker) tuning
    pub const EAGLE_SIZE: f32 = 70.0;
    pub const EAGLE_SPRITE_SIZE: f32 = 100.0;
    pub const EAGLE_SPEED: f32 = 4.0;
    pub const EAGLE_SPAWN_INTERVAL: u32 = 180;
    pub const EAGLE_WARNING_FRAMES: u32 = 60;
    pub const EAGLE_FRAMES: u32 = 8;
    pub const EAGLE_FRAME_DELAY: u32 = 4;
    /// Spawn x offset past the right screen edge
    pub const EAGLE_SPAWN_LEAD: f32 = 150.0;
    /// Extra margin past the left edge before an eagle counts as dodged
    pub const EAGLE_DESPAWN_MARGIN: f32 = 200.0;
    /// The first few eagles stay in a narrow high band
    pub const EAGLE_EASY_SPAWNS: u32 = 3;
    pub const EAGLE_EASY_MIN_Y: f32 = 100.0;
    pub const EAGLE_EASY_MAX_Y: f32 = 180.0;

    /// Scoring
    pub const SCORE_CATCH: u64 = 10;
    pub const SCORE_DODGE: u64 = 5;

    /// Countdown: displayed number decrements every this many frames
    pub const COUNTDOWN_START: u32 = 3;
    pub const COUNTDOWN_INTERVAL_FRAMES: u32 = 60;

    /// Floating score text lifetime and rise speed
    pub const SCORE_POP_LIFETIME: u32 = 60;
    pub const SCORE_POP_RISE: f32 = -2.0;
}

/// Aspect-"cover" fit of a source image into a destination rectangle.
///
/// Returns (x, y, w, h) such that the source fills the destination while
/// preserving aspect ratio, centering the overflow.
pub fn cover_fit(src_w: f32, src_h: f32, dst_w: f32, dst_h: f32) -> (f32, f32, f32, f32) {
    let src_aspect = src_w / src_h;
    let dst_aspect = dst_w / dst_h;

    if dst_aspect > src_aspect {
        let h = dst_w / src_aspect;
        (0.0, (dst_h - h) / 2.0, dst_w, h)
    } else {
        let w = dst_h * src_aspect;
        ((dst_w - w) / 2.0, 0.0, w, dst_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_fit_wide_destination() {
        // 1:1 source into 2:1 destination fills the width and overflows height
        let (x, y, w, h) = cover_fit(100.0, 100.0, 200.0, 100.0);
        assert_eq!(x, 0.0);
        assert_eq!(w, 200.0);
        assert_eq!(h, 200.0);
        assert_eq!(y, -50.0);
    }

    #[test]
    fn test_cover_fit_tall_destination() {
        let (x, y, w, h) = cover_fit(200.0, 100.0, 100.0, 100.0);
        assert_eq!(y, 0.0);
        assert_eq!(h, 100.0);
        assert_eq!(w, 200.0);
        assert_eq!(x, -50.0);
    }

    #[test]
    fn test_cover_fit_exact_match() {
        let (x, y, w, h) = cover_fit(400.0, 300.0, 400.0, 300.0);
        assert_eq!((x, y, w, h), (0.0, 0.0, 400.0, 300.0));
    }
}
