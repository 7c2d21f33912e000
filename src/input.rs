//! Keyboard input
//!
//! The host pushes raw key events in whenever they arrive. Movement keys are
//! folded into a held set that the loop polls once per tick; every other key
//! press becomes a start/reset trigger.

use std::collections::{HashSet, VecDeque};

use crate::sim::{Direction, GameState, TickInput};

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Char(char),
}

impl Key {
    /// Movement direction for arrow keys
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Raw key event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Discrete request to start (or restart) a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    StartOrReset,
}

/// Currently held movement keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: HashSet<Direction>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the key was not already held
    pub fn press(&mut self, direction: Direction) -> bool {
        self.held.insert(direction)
    }

    /// Returns `true` if the key was held
    pub fn release(&mut self, direction: Direction) -> bool {
        self.held.remove(&direction)
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(Direction::Left),
            right: self.is_held(Direction::Right),
        }
    }
}

impl FromIterator<Direction> for HeldKeys {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Where the loop gets its input each tick
pub trait InputSource {
    /// Next pending start/reset trigger, if any
    fn poll_trigger(&mut self) -> Option<Trigger>;

    /// Movement keys to apply on the coming tick
    fn held_keys(&mut self, state: &GameState) -> HeldKeys;
}

/// Buffers host key events between ticks
#[derive(Debug, Default)]
pub struct InputController {
    held: HeldKeys,
    triggers: VecDeque<Trigger>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one host event into the buffered state
    pub fn handle(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => match key.direction() {
                Some(direction) => {
                    self.held.press(direction);
                }
                None => self.triggers.push_back(Trigger::StartOrReset),
            },
            KeyEvent::Released(key) => {
                if let Some(direction) = key.direction() {
                    self.held.release(direction);
                }
            }
        }
    }

    pub fn held(&self) -> &HeldKeys {
        &self.held
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl InputSource for InputController {
    fn poll_trigger(&mut self) -> Option<Trigger> {
        self.triggers.pop_front()
    }

    fn held_keys(&mut self, _state: &GameState) -> HeldKeys {
        self.held.clone()
    }
}

/// Demo player: steers the paddle under the ball
#[derive(Debug, Default)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn poll_trigger(&mut self) -> Option<Trigger> {
        None
    }

    fn held_keys(&mut self, state: &GameState) -> HeldKeys {
        let paddle = &state.paddle;
        let target = state.ball.center_x();
        let center = paddle.pos.x + paddle.width / 2.0;
        // Dead zone keeps the paddle from oscillating around the target
        let slack = paddle.speed / 2.0;

        if target < center - slack {
            HeldKeys::from_iter([Direction::Left])
        } else if target > center + slack {
            HeldKeys::from_iter([Direction::Right])
        } else {
            HeldKeys::new()
        }
    }
}
