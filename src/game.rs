//! Game loop and top-level state machine
//!
//! Idle → Running on a start trigger, Running → GameOver when the ball hits
//! the floor, GameOver → Running on the next trigger (reset first, with no
//! idle frame in between).

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::input::{HeldKeys, InputSource, Trigger};
use crate::render::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{self, GameState};
use crate::ticker::{Clock, Ticker};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Waiting for the first start trigger
    Idle,
    /// Ball in play, ticking
    Running,
    /// Ball lost; waiting for a restart trigger
    GameOver,
}

/// Result of a single `GameLoop::tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing was simulated
    Halted,
    /// Still running, schedule another tick
    Continue,
    /// The ball was lost on this tick
    GameOver,
}

/// Where a `run` ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub phase: GamePhase,
    /// Ticks simulated over the loop's lifetime
    pub ticks: u64,
    pub score: u64,
    pub bricks_left: usize,
}

pub struct GameLoop {
    state: GameState,
    phase: GamePhase,
    settings: Settings,
    ticks: u64,
}

impl GameLoop {
    pub fn new(width: f32, height: f32, seed: u64, settings: Settings) -> Result<Self, GameError> {
        let state = GameState::new(width, height, seed)?;
        log::info!("New game {}x{} with seed {}", width, height, state.seed());
        Ok(Self {
            state,
            phase: GamePhase::Idle,
            settings,
            ticks: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that stage positions
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Handle a start/reset trigger. Returns `true` if a game started.
    pub fn trigger(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => false,
            GamePhase::Idle => {
                self.state.running = true;
                self.phase = GamePhase::Running;
                log::info!("Game started");
                true
            }
            GamePhase::GameOver => {
                self.state.restart();
                self.state.running = true;
                self.phase = GamePhase::Running;
                log::info!("Game restarted");
                true
            }
        }
    }

    /// Simulate one tick if running
    pub fn tick(&mut self, held: &HeldKeys) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Halted;
        }

        sim::tick(&mut self.state, &held.to_tick_input());
        self.ticks += 1;

        if !self.state.running {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over after {} ticks: score {}, {} bricks left",
                self.ticks,
                self.state.score,
                self.state.bricks.len()
            );
            return TickOutcome::GameOver;
        }
        TickOutcome::Continue
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            phase: self.phase,
            score: self.state.score,
            ball: &self.state.ball,
            paddle: &self.state.paddle,
            bricks: &self.state.bricks,
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            phase: self.phase,
            ticks: self.ticks,
            score: self.state.score,
            bricks_left: self.state.bricks.len(),
        }
    }

    /// Drive the game at the configured cadence.
    ///
    /// Draws the current frame, applies pending triggers, then ticks while
    /// running. Returns once the game halts (idle with no trigger, or game
    /// over) or the tick limit is reached; call again after the next
    /// trigger to resume.
    pub fn run<I, R, C>(
        &mut self,
        input: &mut I,
        renderer: &mut R,
        clock: &mut C,
    ) -> Result<RunSummary, GameError>
    where
        I: InputSource,
        R: Renderer,
        C: Clock,
    {
        let mut ticker = Ticker::new(self.settings.tick_interval(), self.settings.max_substeps);
        renderer.draw(&self.frame())?;
        // Time spent before the loop does not count
        clock.elapsed();

        'run: loop {
            while let Some(trigger) = input.poll_trigger() {
                match trigger {
                    Trigger::StartOrReset => {
                        if self.trigger() {
                            ticker.reset();
                            renderer.draw(&self.frame())?;
                        }
                    }
                }
            }

            if self.phase != GamePhase::Running || self.settings.tick_limit_reached(self.ticks) {
                break;
            }

            let due = ticker.advance(clock.elapsed());
            for _ in 0..due {
                let held = input.held_keys(&self.state);
                let outcome = self.tick(&held);
                renderer.draw(&self.frame())?;

                if outcome == TickOutcome::GameOver || self.settings.tick_limit_reached(self.ticks) {
                    break 'run;
                }
            }

            clock.sleep(ticker.interval());
        }

        Ok(self.summary())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::input::{Autopilot, InputController, Key, KeyEvent};
    use crate::sim::Direction;
    use crate::ticker::ManualClock;

    #[derive(Default)]
    struct Recorder {
        phases: Vec<GamePhase>,
        scores: Vec<u64>,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &Frame<'_>) -> Result<(), GameError> {
            self.phases.push(frame.phase);
            self.scores.push(frame.score);
            Ok(())
        }
    }

    fn new_loop(settings: Settings) -> GameLoop {
        GameLoop::new(800.0, 600.0, 42, settings).unwrap()
    }

    /// Ball heading straight for the floor, paddle out of the way.
    /// Lost on the seventh tick.
    fn stage_falling_ball(game: &mut GameLoop) {
        let state = game.state_mut();
        state.paddle.pos.x = 0.0;
        state.ball.pos = Vec2::new(400.0, 570.0);
        state.ball.vel = Vec2::new(3.0, 3.0);
    }

    #[test]
    fn test_starts_idle() {
        let game = new_loop(Settings::default());
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(!game.state().running);
        assert_eq!(game.frame().banner(), Some(crate::render::START_PROMPT));
    }

    #[test]
    fn test_idle_tick_is_halted() {
        let mut game = new_loop(Settings::default());
        let ball = game.state().ball;

        assert_eq!(game.tick(&HeldKeys::new()), TickOutcome::Halted);
        assert_eq!(game.ticks(), 0);
        assert_eq!(game.state().ball, ball);
    }

    #[test]
    fn test_trigger_starts_without_reset() {
        let mut game = new_loop(Settings::default());
        game.state_mut().ball.pos = Vec2::new(123.0, 321.0);

        assert!(game.trigger());
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.state().running);
        assert_eq!(game.state().ball.pos, Vec2::new(123.0, 321.0));

        // Ignored while running
        assert!(!game.trigger());
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_floor_hit_enters_game_over() {
        let mut game = new_loop(Settings::default());
        game.trigger();
        stage_falling_ball(&mut game);

        let mut outcomes = Vec::new();
        for _ in 0..7 {
            outcomes.push(game.tick(&HeldKeys::new()));
        }

        assert!(outcomes[..6].iter().all(|o| *o == TickOutcome::Continue));
        assert_eq!(outcomes[6], TickOutcome::GameOver);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(!game.state().running);

        // No further ticks once over
        assert_eq!(game.tick(&HeldKeys::new()), TickOutcome::Halted);
        assert_eq!(game.ticks(), 7);
    }

    #[test]
    fn test_trigger_after_game_over_resets_and_runs() {
        let mut game = new_loop(Settings::default());
        game.trigger();
        game.state_mut().bricks.truncate(3);
        game.state_mut().score = 470;
        stage_falling_ball(&mut game);
        while game.tick(&HeldKeys::new()) == TickOutcome::Continue {}

        assert!(game.trigger());
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.state().running);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().bricks.len(), BRICK_ROWS * BRICK_COLS);
        assert_eq!(game.state().ball.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_held_keys_move_paddle() {
        let mut game = new_loop(Settings::default());
        game.trigger();
        let x = game.state().paddle.pos.x;

        let held = HeldKeys::from_iter([Direction::Left]);
        game.tick(&held);
        game.tick(&held);
        assert_eq!(game.state().paddle.pos.x, x - 2.0 * PADDLE_SPEED);
    }

    #[test]
    fn test_run_until_game_over() {
        let mut game = new_loop(Settings::default());
        stage_falling_ball(&mut game);

        let mut input = InputController::new();
        input.handle(KeyEvent::Pressed(Key::Enter));
        let mut renderer = Recorder::default();
        let mut clock = ManualClock::new();

        let summary = game.run(&mut input, &mut renderer, &mut clock).unwrap();

        assert_eq!(summary.phase, GamePhase::GameOver);
        assert_eq!(summary.ticks, 7);
        assert_eq!(summary.bricks_left, BRICK_ROWS * BRICK_COLS);

        // Initial idle frame, start frame, one per tick
        assert_eq!(renderer.phases.len(), 9);
        assert_eq!(renderer.phases[0], GamePhase::Idle);
        assert!(renderer.phases[1..8].iter().all(|p| *p == GamePhase::Running));
        assert_eq!(renderer.phases[8], GamePhase::GameOver);

        // Ticks ran on the fixed 20ms cadence
        assert_eq!(clock.total(), Duration::from_millis(140));
    }

    #[test]
    fn test_run_restarts_from_game_over() {
        let mut game = new_loop(Settings::default());
        let mut input = InputController::new();
        let mut renderer = Recorder::default();
        let mut clock = ManualClock::new();

        stage_falling_ball(&mut game);
        input.handle(KeyEvent::Pressed(Key::Space));
        game.run(&mut input, &mut renderer, &mut clock).unwrap();
        assert_eq!(game.phase(), GamePhase::GameOver);

        // Halted: no trigger means no ticks
        let summary = game.run(&mut input, &mut renderer, &mut clock).unwrap();
        assert_eq!(summary.ticks, 7);

        renderer.phases.clear();
        input.handle(KeyEvent::Pressed(Key::Char('r')));
        let mut limited = GameLoop {
            settings: Settings {
                max_ticks: Some(10),
                ..Settings::default()
            },
            ..game
        };
        let summary = limited.run(&mut input, &mut renderer, &mut clock).unwrap();

        // Restarted straight into Running, no idle frame after the reset
        assert_eq!(renderer.phases[0], GamePhase::GameOver);
        assert_eq!(renderer.phases[1], GamePhase::Running);
        assert!(!renderer.phases.contains(&GamePhase::Idle));
        assert_eq!(summary.phase, GamePhase::Running);
        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.bricks_left, BRICK_ROWS * BRICK_COLS);
    }

    #[test]
    fn test_run_idle_without_trigger_returns() {
        let mut game = new_loop(Settings::default());
        let mut renderer = Recorder::default();
        let mut clock = ManualClock::new();

        let summary = game
            .run(&mut InputController::new(), &mut renderer, &mut clock)
            .unwrap();

        assert_eq!(summary.phase, GamePhase::Idle);
        assert_eq!(summary.ticks, 0);
        assert_eq!(renderer.phases, vec![GamePhase::Idle]);
        assert_eq!(clock.total(), Duration::ZERO);
    }

    #[test]
    fn test_autopilot_demo_is_consistent() {
        let mut game = new_loop(Settings::bounded(20_000));
        game.trigger();
        let mut renderer = Recorder::default();
        let mut clock = ManualClock::new();

        let summary = game.run(&mut Autopilot, &mut renderer, &mut clock).unwrap();

        assert!(summary.ticks <= 20_000);
        let removed = (BRICK_ROWS * BRICK_COLS - summary.bricks_left) as u64;
        assert_eq!(summary.score, removed * BRICK_SCORE);
        // Score never decreases between frames
        assert!(renderer.scores.windows(2).all(|w| w[0] <= w[1]));
    }
}
