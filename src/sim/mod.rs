//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major brick order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Axis, Rect, Side, impact_side, reflect};
pub use state::{Ball, Brick, BrickColor, Direction, GameState, PALETTE, Paddle, brick_grid};
pub use tick::{BrickHit, StepReport, TickInput, tick, update};
