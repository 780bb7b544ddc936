use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameError, GameNotice, GameSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    Guess { letter: String },
    UseHint,
    Restart,
    Pause,
    Resume,
    Heartbeat,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    StateUpdate { state: GameSnapshot },
    Notice { notice: GameNotice },
    ScoreRecorded { points: i32 },
    Error { error: GameError },
}
