//! Game state and core simulation types
//!
//! Everything the per-frame tick mutates lives here, owned by [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::track::Track;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// 3..2..1 countdown before the train starts moving
    Countdown,
    /// Active gameplay
    Running,
    /// Run ended (fell through a gap or hit by an eagle); rendering continues
    GameOver,
}

/// Events emitted by the simulation for the host (audio triggers, logging).
///
/// Drained by the host once per frame; the sim never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player jumped or escalated a jump stage
    Jump,
    /// Pigeon caught
    Catch,
    /// Eagle dodged off the left edge
    Dodge,
    /// Run ended
    GameOver,
}

/// Player animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    Idle,
    Run,
}

impl AnimState {
    /// Frame count of the sprite strip for this state
    pub fn frame_count(self) -> u32 {
        match self {
            AnimState::Idle => CAT_IDLE_FRAMES,
            AnimState::Run => CAT_RUN_FRAMES,
        }
    }
}

/// The player-controlled cat
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the sprite box
    pub pos: Vec2,
    pub vel_y: f32,
    pub airborne: bool,
    /// 0 = grounded, 1..=3 = low/normal/high jump
    pub jump_stage: u8,
    /// Wall-clock timestamp (ms) of the last accepted jump press
    pub last_jump_press_ms: f64,
    pub crouching: bool,
    pub facing_left: bool,
    pub anim: AnimState,
    pub frame_index: u32,
    pub frame_timer: u32,
}

impl Player {
    pub fn new(layout: &WorldLayout) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, layout.ground_y()),
            vel_y: 0.0,
            airborne: false,
            jump_stage: 0,
            last_jump_press_ms: 0.0,
            crouching: false,
            facing_left: false,
            anim: AnimState::Idle,
            frame_index: 0,
            frame_timer: 0,
        }
    }
}

/// A collectible pigeon, flying leftward at constant speed
#[derive(Debug, Clone)]
pub struct Pigeon {
    pub pos: Vec2,
    pub vel_x: f32,
    pub frame_index: u32,
    pub frame_timer: u32,
}

/// Eagle lifecycle: telegraphed, then lethal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaglePhase {
    /// Stationary and collision-immune while the warning plays out
    Warning { frames_left: u32 },
    /// Moving leftward; collision ends the run
    Active,
}

/// An aerial attacker
#[derive(Debug, Clone)]
pub struct Eagle {
    pub pos: Vec2,
    pub vel_x: f32,
    pub phase: EaglePhase,
    pub frame_index: u32,
    pub frame_timer: u32,
}

impl Eagle {
    pub fn is_active(&self) -> bool {
        self.phase == EaglePhase::Active
    }
}

/// Floating score text; purely cosmetic
#[derive(Debug, Clone)]
pub struct ScorePop {
    pub pos: Vec2,
    pub text: String,
    pub age: u32,
}

impl ScorePop {
    /// Linear fade over the fixed lifetime
    pub fn alpha(&self) -> f32 {
        1.0 - self.age as f32 / SCORE_POP_LIFETIME as f32
    }
}

/// Screen and sprite geometry the simulation depends on.
///
/// On the web host these come from loaded image dimensions; tests use the
/// defaults.
#[derive(Debug, Clone)]
pub struct WorldLayout {
    pub screen_w: f32,
    pub screen_h: f32,
    /// Top of the train roof
    pub train_y: f32,
    /// Repeating center car
    pub car_w: f32,
    pub car_h: f32,
    /// One-time leading end-cap
    pub end_w: f32,
    pub end_h: f32,
    /// Player sprite box (frame size x scale)
    pub cat_w: f32,
    pub cat_h: f32,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            screen_w: 1024.0,
            screen_h: 768.0,
            train_y: 608.0,
            car_w: 200.0,
            car_h: 160.0,
            end_w: 130.0,
            end_h: 160.0,
            cat_w: 64.0,
            cat_h: 64.0,
        }
    }
}

impl WorldLayout {
    /// Y of the player's top edge when standing on the roof
    pub fn ground_y(&self) -> f32 {
        self.train_y - self.cat_h + PLAYER_OFFSET_Y
    }

    /// Highest pigeon spawn altitude (kept well above the roof)
    pub fn pigeon_max_y(&self) -> f32 {
        self.train_y - PIGEON_ROOF_CLEARANCE
    }
}

/// Frame-counted spawn timers and the eagle difficulty counter
#[derive(Debug, Clone, Default)]
pub struct SpawnTimers {
    pub pigeon_timer: u32,
    pub eagle_timer: u32,
    /// Monotonic; drives the difficulty ramp, never resets
    pub eagles_spawned: u32,
}

/// Complete game state, advanced by [`super::tick::tick`]
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub layout: WorldLayout,

    pub score: u64,
    pub pigeons_caught: u32,
    pub eagles_dodged: u32,

    /// Displayed countdown number
    pub countdown: u32,
    pub countdown_timer: u32,

    pub track: Track,
    pub player: Player,
    pub pigeons: Vec<Pigeon>,
    pub eagles: Vec<Eagle>,
    pub pops: Vec<ScorePop>,
    pub spawn: SpawnTimers,

    /// Simulation frame counter (frames spent in `Running`)
    pub time_frames: u64,
    /// Pending events for the host; drained once per frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh game in the countdown phase
    pub fn new(seed: u64, layout: WorldLayout) -> Self {
        let track = Track::new(&layout);
        let player = Player::new(&layout);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Countdown,
            layout,
            score: 0,
            pigeons_caught: 0,
            eagles_dodged: 0,
            countdown: COUNTDOWN_START,
            countdown_timer: 0,
            track,
            player,
            pigeons: Vec::new(),
            eagles: Vec::new(),
            pops: Vec::new(),
            spawn: SpawnTimers::default(),
            time_frames: 0,
            events: Vec::new(),
        }
    }

    /// Whether the countdown has finished and the run has begun
    pub fn started(&self) -> bool {
        self.phase != GamePhase::Countdown
    }

    /// Take pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn a floating score text above the given point
    pub fn push_pop(&mut self, pos: Vec2, amount: u64) {
        self.pops.push(ScorePop {
            pos,
            text: format!("+{amount}"),
            age: 0,
        });
    }
}
