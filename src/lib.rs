//! Brick Breaker - a single-screen paddle, ball and brick wall game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `game`: Idle/Running/GameOver state machine and the fixed-cadence loop
//! - `input`: Held-key tracking and start/reset triggers
//! - `render`: Frame snapshots handed to a renderer
//! - `ticker`: Fixed timestep accumulator and clocks

pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ticker;

pub use error::GameError;
pub use game::{GameLoop, GamePhase, TickOutcome};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed tick interval in milliseconds (~50 Hz)
    pub const TICK_INTERVAL_MS: u64 = 20;
    /// Maximum ticks run per loop iteration to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena used by the headless host (there is no display to size against)
    pub const DEFAULT_ARENA_WIDTH: f32 = 800.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 10.0;
    /// Per-axis speed in pixels per tick
    pub const BALL_SPEED: f32 = 3.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Pixels per tick while a movement key is held
    pub const PADDLE_SPEED: f32 = 20.0;
    /// Distance from the paddle's top edge to the arena floor
    pub const PADDLE_FLOOR_OFFSET: f32 = 30.0;

    /// Brick grid
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_HEIGHT: f32 = 20.0;

    /// Points per destroyed brick
    pub const BRICK_SCORE: u64 = 10;
}
