//! Game state and core simulation types
//!
//! One `GameState` is one session. It is rebuilt in place by `reset`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::error::GameError;

/// Horizontal paddle movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// The ball. `pos` is the top-left corner of its bounding square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Per-tick displacement
    pub vel: Vec2,
    /// Diameter
    pub size: f32,
}

impl Ball {
    /// Spawn at the arena centre heading up, horizontal sign picked by `rng`
    pub fn spawn(width: f32, height: f32, rng: &mut Pcg32) -> Self {
        let dx = if rng.random_bool(0.5) {
            BALL_SPEED
        } else {
            -BALL_SPEED
        };
        Self {
            pos: Vec2::new((width / 2.0).floor(), (height / 2.0).floor()),
            vel: Vec2::new(dx, -BALL_SPEED),
            size: BALL_SIZE,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Position after one more tick at the current velocity
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle. `pos` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels moved per tick while a direction is held
    pub speed: f32,
}

impl Paddle {
    /// Centred horizontally, a fixed offset above the floor
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new((width / 2.0).floor() - PADDLE_WIDTH / 2.0, height - PADDLE_FLOOR_OFFSET),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            self.pos.x + self.width,
            self.pos.y + self.height,
        )
    }

    /// Move one step in `direction`, never leaving `[0, arena_width - width]`
    pub fn shift(&mut self, direction: Direction, arena_width: f32) {
        let delta = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
        };
        let max_x = (arena_width - self.width).max(0.0);
        self.pos.x = (self.pos.x + delta).clamp(0.0, max_x);
    }
}

/// Brick colour, assigned by row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrickColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

/// Row palette, cycled top to bottom
pub const PALETTE: [BrickColor; 5] = [
    BrickColor::Red,
    BrickColor::Orange,
    BrickColor::Yellow,
    BrickColor::Green,
    BrickColor::Blue,
];

impl BrickColor {
    pub fn for_row(row: usize) -> Self {
        PALETTE[row % PALETTE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickColor::Red => "red",
            BrickColor::Orange => "orange",
            BrickColor::Yellow => "yellow",
            BrickColor::Green => "green",
            BrickColor::Blue => "blue",
        }
    }
}

/// A destructible brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: BrickColor,
}

/// Build the row-major brick wall for an arena of the given width
pub fn brick_grid(width: f32) -> Vec<Brick> {
    let brick_width = (width / BRICK_COLS as f32).floor();
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);

    for row in 0..BRICK_ROWS {
        let color = BrickColor::for_row(row);
        for col in 0..BRICK_COLS {
            bricks.push(Brick {
                rect: Rect::new(
                    col as f32 * brick_width,
                    row as f32 * BRICK_HEIGHT,
                    (col + 1) as f32 * brick_width,
                    (row + 1) as f32 * BRICK_HEIGHT,
                ),
                color,
            });
        }
    }

    bricks
}

/// Check that a game fits in the given arena
pub fn validate_arena(width: f32, height: f32) -> Result<(), GameError> {
    let invalid = |reason| GameError::InvalidArena {
        width,
        height,
        reason,
    };

    if !width.is_finite() || !height.is_finite() {
        return Err(invalid("dimensions must be finite"));
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(invalid("dimensions must be positive"));
    }
    if width < PADDLE_WIDTH {
        return Err(invalid("arena is narrower than the paddle"));
    }
    if height < PADDLE_FLOOR_OFFSET {
        return Err(invalid("arena is shorter than the paddle offset"));
    }
    Ok(())
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    width: f32,
    height: f32,
    seed: u64,
    /// Drawn from on every reset; seeded once per session
    rng: Pcg32,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Remaining bricks in row-major creation order
    pub bricks: Vec<Brick>,
    pub score: u64,
    /// True while the ball is in play
    pub running: bool,
}

impl GameState {
    /// Create a fresh, idle session
    pub fn new(width: f32, height: f32, seed: u64) -> Result<Self, GameError> {
        validate_arena(width, height)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::spawn(width, height, &mut rng);
        Ok(Self {
            width,
            height,
            seed,
            rng,
            ball,
            paddle: Paddle::centered(width, height),
            bricks: brick_grid(width),
            score: 0,
            running: false,
        })
    }

    /// Reinitialise ball, paddle, bricks and score. Leaves the game idle.
    ///
    /// Dimensions are expected to have passed `validate_arena`.
    pub fn reset(&mut self, width: f32, height: f32) {
        debug_assert!(validate_arena(width, height).is_ok());

        self.width = width;
        self.height = height;
        self.ball = Ball::spawn(width, height, &mut self.rng);
        self.paddle = Paddle::centered(width, height);
        self.bricks = brick_grid(width);
        self.score = 0;
        self.running = false;
    }

    /// Reset keeping the current arena size
    pub fn restart(&mut self) {
        self.reset(self.width, self.height);
    }

    /// Move the paddle one step, clamped to the arena
    pub fn move_paddle(&mut self, direction: Direction) {
        self.paddle.shift(direction, self.width);
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
