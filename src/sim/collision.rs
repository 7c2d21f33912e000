//! Collision detection for axis-aligned boxes
//!
//! Everything in the arena is a rectangle: bricks, the paddle, and the ball's
//! bounding square. Brick hits also need to know which face was struck so the
//! right velocity axis can be reflected.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Inclusive overlap with a square of side `size` whose top-left is `pos`.
    /// Touching edges count as overlapping.
    pub fn overlaps_square(&self, pos: Vec2, size: f32) -> bool {
        self.x1 <= pos.x + size && pos.x <= self.x2 && self.y1 <= pos.y + size && pos.y <= self.y2
    }
}

/// Face of a brick struck by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Velocity component flipped by a bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Side {
    pub fn axis(self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Y,
            Side::Left | Side::Right => Axis::X,
        }
    }
}

/// Decide which face of `rect` a ball at `next_pos` struck.
///
/// Each face's penetration (the ball's next edge past the brick's edge) is
/// compared with the per-tick travel on that axis. Faces are tested in the
/// fixed order top, bottom, left, right and the first match wins, so a corner
/// hit can resolve to a face the ball did not visually touch. Returns `None`
/// when no face test passes (deep overlap); the brick still counts as hit.
pub fn impact_side(rect: &Rect, next_pos: Vec2, size: f32, vel: Vec2) -> Option<Side> {
    let (adx, ady) = (vel.x.abs(), vel.y.abs());

    if next_pos.y + size - rect.y1 < ady {
        Some(Side::Top)
    } else if rect.y2 - next_pos.y < ady {
        Some(Side::Bottom)
    } else if next_pos.x + size - rect.x1 < adx {
        Some(Side::Left)
    } else if rect.x2 - next_pos.x < adx {
        Some(Side::Right)
    } else {
        None
    }
}

/// Flip one velocity component
#[inline]
pub fn reflect(vel: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(-vel.x, vel.y),
        Axis::Y => Vec2::new(vel.x, -vel.y),
    }
}
