//! Crate error type

use crate::sim::WallId;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{wall:?} wall needs exactly 4 corners, got {count}")]
    WallCorners { wall: WallId, count: usize },
    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("Audio playback failed: {0}")]
    Playback(String),
    #[error("Missing host element #{0}")]
    MissingElement(&'static str),
}
