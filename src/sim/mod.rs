//! Deterministic game simulation
//!
//! The sim is platform-free: it owns all game state, advances one fixed
//! 60 Hz frame per [`tick`], and reports side effects to the host as
//! [`GameEvent`]s. Wall-clock time only enters through the press timestamps
//! on [`TickInput`], which keeps the jump chain testable with synthetic
//! clocks.

pub mod collision;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod track;

pub use state::{
    AnimState, Eagle, EaglePhase, GameEvent, GamePhase, GameState, Pigeon, Player, ScorePop,
    SpawnTimers, WorldLayout,
};
pub use tick::{TickInput, tick};
pub use track::{Span, SpanKind, Track};
