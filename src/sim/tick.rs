//! Fixed timestep simulation tick
//!
//! `update` is the physics step; `tick` wraps it with the paddle intents
//! for one frame. Velocities are per tick, so nothing here takes a `dt`.

use super::collision::{Axis, Side, impact_side, reflect};
use super::state::{Brick, Direction, GameState};
use crate::consts::BRICK_SCORE;

/// Movement keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// A brick destroyed this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickHit {
    /// Position of the brick in the collection before removal
    pub index: usize,
    pub brick: Brick,
    /// Face chosen for the bounce; `None` means no velocity change
    pub side: Option<Side>,
}

/// Everything that happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Bounced off the left or right wall
    pub wall_x: bool,
    /// Bounced off the ceiling
    pub wall_top: bool,
    /// Reached the floor; the game is over
    pub ball_lost: bool,
    pub paddle_hit: bool,
    pub brick: Option<BrickHit>,
}

/// Advance the ball one tick and resolve its collisions.
///
/// Order matters and is fixed: integrate, walls, floor, paddle, bricks.
/// Losing the ball does not short-circuit the later checks.
pub fn update(state: &mut GameState) -> StepReport {
    let mut report = StepReport::default();
    let (width, height) = (state.width(), state.height());
    let ball = &mut state.ball;

    ball.pos += ball.vel;

    // Walls reflect without position correction
    if ball.pos.x <= 0.0 || ball.pos.x + ball.size >= width {
        ball.vel = reflect(ball.vel, Axis::X);
        report.wall_x = true;
        log::trace!("Wall bounce at x={}", ball.pos.x);
    }
    if ball.pos.y <= 0.0 {
        ball.vel = reflect(ball.vel, Axis::Y);
        report.wall_top = true;
        log::trace!("Ceiling bounce at x={}", ball.pos.x);
    }

    if ball.bottom() >= height {
        state.running = false;
        report.ball_lost = true;
        log::info!("Ball lost at x={} with score {}", ball.pos.x, state.score);
    }

    let paddle = state.paddle.rect();
    let center_x = ball.center_x();
    let bottom = ball.bottom();
    if paddle.x1 < center_x && center_x < paddle.x2 && paddle.y1 < bottom && bottom < paddle.y2 {
        ball.vel = reflect(ball.vel, Axis::Y);
        report.paddle_hit = true;
        log::debug!("Paddle bounce at x={}", center_x);
    }

    report.brick = check_brick_collisions(state);
    report
}

/// Resolve at most one brick hit against the ball's next position
fn check_brick_collisions(state: &mut GameState) -> Option<BrickHit> {
    let ball = &mut state.ball;
    let next = ball.next_pos();

    let index = state
        .bricks
        .iter()
        .position(|brick| brick.rect.overlaps_square(next, ball.size))?;

    let side = impact_side(&state.bricks[index].rect, next, ball.size, ball.vel);
    if let Some(side) = side {
        ball.vel = reflect(ball.vel, side.axis());
    }

    let brick = state.bricks.remove(index);
    state.score += BRICK_SCORE;
    log::debug!(
        "Brick {} ({}) destroyed via {:?}, score {}",
        index,
        brick.color.as_str(),
        side,
        state.score
    );

    Some(BrickHit { index, brick, side })
}

/// Advance the game by one tick: physics, then held movement keys.
///
/// Left is applied before right, so holding both lands wherever the right
/// step leaves the paddle. Does nothing unless the game is running.
pub fn tick(state: &mut GameState, input: &TickInput) -> StepReport {
    if !state.running {
        return StepReport::default();
    }

    let report = update(state);

    if input.left {
        state.move_paddle(Direction::Left);
    }
    if input.right {
        state.move_paddle(Direction::Right);
    }

    report
}
