//! Axis-aligned collision boxes
//!
//! Player hitboxes are inset from the full sprite bounds so collisions feel
//! forgiving, and the inset differs per partner: pigeons are caught with the
//! full body, eagles only count on a tighter core box. Crouching halves the
//! vertical extent (top edge drops to compensate).

use glam::Vec2;

use crate::consts::*;

use super::state::{Eagle, Pigeon, Player, WorldLayout};

/// An axis-aligned box, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Overlap test, strict `<` on all four comparisons: boxes that merely
    /// touch edges do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Player box used against pigeons: the full sprite, halved when crouching
pub fn player_box_vs_pigeon(player: &Player, layout: &WorldLayout) -> Aabb {
    let (w, h) = (layout.cat_w, layout.cat_h);
    if player.crouching {
        Aabb::new(player.pos.x, player.pos.y + h / 2.0, w, h / 2.0)
    } else {
        Aabb::new(player.pos.x, player.pos.y, w, h)
    }
}

/// Player box used against eagles: inset 10px per side for fairness, and
/// further shortened while crouching
pub fn player_box_vs_eagle(player: &Player, layout: &WorldLayout) -> Aabb {
    let (w, h) = (layout.cat_w, layout.cat_h);
    if player.crouching {
        Aabb::new(
            player.pos.x + 10.0,
            player.pos.y + h / 2.0,
            w - 20.0,
            h / 2.0 - 10.0,
        )
    } else {
        Aabb::new(player.pos.x + 10.0, player.pos.y + 10.0, w - 20.0, h - 20.0)
    }
}

/// Pigeon box: the full display sprite
pub fn pigeon_box(pigeon: &Pigeon) -> Aabb {
    Aabb::new(pigeon.pos.x, pigeon.pos.y, PIGEON_SIZE, PIGEON_SIZE)
}

/// Eagle box: inset 20px per side of the display sprite
pub fn eagle_box(eagle: &Eagle) -> Aabb {
    Aabb::new(
        eagle.pos.x + 20.0,
        eagle.pos.y + 20.0,
        EAGLE_SIZE - 40.0,
        EAGLE_SIZE - 40.0,
    )
}
