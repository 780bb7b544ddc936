use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    InvalidLetter { input: String },
    InvalidMessage { reason: String },
    RateLimited,
    SessionClosed,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidLetter { input } => {
                write!(f, "\"{}\" is not a single letter", input)
            }
            GameError::InvalidMessage { reason } => write!(f, "Invalid message: {}", reason),
            GameError::RateLimited => write!(f, "Too many messages, slow down"),
            GameError::SessionClosed => write!(f, "Game session is no longer running"),
        }
    }
}
