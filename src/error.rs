//! Crate error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Arena dimensions cannot hold a game
    #[error("invalid arena {width}x{height}: {reason}")]
    InvalidArena {
        width: f32,
        height: f32,
        reason: &'static str,
    },

    /// Renderer sink failed
    #[error("render output failed: {0}")]
    Io(#[from] std::io::Error),

    /// Frame could not be serialized
    #[error("frame serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
