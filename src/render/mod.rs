//! Rendering
//!
//! Split in two: [`frame`] turns a [`crate::sim::GameState`] into a flat
//! list of draw commands with no platform types involved, and [`canvas`]
//! replays that list onto a 2D canvas context on the web host. Keeping the
//! command builder pure lets the draw logic run under plain `cargo test`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use frame::{DrawCmd, SheetId, build_frame};
