//! Brick Breaker entry point
//!
//! Headless host: the autopilot plays, frames go to stdout as JSON lines.

use std::io::{self, BufWriter};
use std::time::{SystemTime, UNIX_EPOCH};

use brick_breaker::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use brick_breaker::input::Autopilot;
use brick_breaker::render::JsonLinesRenderer;
use brick_breaker::ticker::SystemClock;
use brick_breaker::{GameError, GameLoop, Settings};

/// Ticks before the demo gives up (~5 minutes at 50 Hz)
const DEMO_TICKS: u64 = 15_000;

fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let mut game = GameLoop::new(
        DEFAULT_ARENA_WIDTH,
        DEFAULT_ARENA_HEIGHT,
        clock_seed(),
        Settings::bounded(DEMO_TICKS),
    )?;
    let mut renderer = JsonLinesRenderer::new(BufWriter::new(io::stdout().lock()));
    let mut clock = SystemClock::new();

    // Nothing feeds key events headless, so start the game directly
    game.trigger();
    let summary = game.run(&mut Autopilot, &mut renderer, &mut clock)?;
    renderer.flush()?;

    log::info!(
        "Finished in {:?} after {} ticks: score {}, {} bricks left ({} frames)",
        summary.phase,
        summary.ticks,
        summary.score,
        summary.bricks_left,
        renderer.frames()
    );
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
