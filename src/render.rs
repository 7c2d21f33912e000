//! Rendering interface
//!
//! The game never draws. Each tick it hands a borrowed `Frame` to whatever
//! `Renderer` the host plugs in.

use std::io::Write;

use serde::Serialize;

use crate::error::GameError;
use crate::game::GamePhase;
use crate::sim::{Ball, Brick, Paddle};

/// Prompt shown while idle
pub const START_PROMPT: &str = "Press any key to start";
/// Message shown after the ball is lost
pub const GAME_OVER_MESSAGE: &str = "Game Over\nPress any key to restart";

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub bricks: &'a [Brick],
}

impl Frame<'_> {
    /// Centred overlay text for the current phase
    pub fn banner(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Idle => Some(START_PROMPT),
            GamePhase::Running => None,
            GamePhase::GameOver => Some(GAME_OVER_MESSAGE),
        }
    }
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), GameError>;
}

/// Writes each frame as one line of JSON
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    frames: u64,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn flush(&mut self) -> Result<(), GameError> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), GameError> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.frames += 1;
        Ok(())
    }
}
