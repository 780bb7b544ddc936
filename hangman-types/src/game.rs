use crate::SessionId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    Active,        // Accepting guesses, hints and ticks
    Won,           // Every letter revealed
    LostByGuesses, // Ran out of wrong guesses
    LostByTimeout, // Countdown reached zero
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

/// Read-only view of a session handed to the presentation layer.
///
/// The target word is masked while the session is active; `revealed_word`
/// is only filled in once the session has reached a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSnapshot {
    pub session_id: SessionId,
    pub masked_word: String,
    pub word_length: u32,
    pub hint: String,
    pub revealed_letters: Vec<char>,
    pub wrong_letters: Vec<char>,
    pub wrong_guesses: u32,
    pub max_wrong: u32,
    pub hints_used: u32,
    pub hints_remaining: u32,
    pub score: i32,
    pub total_points: i32,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub time_left: u32,
    pub timer_running: bool,
    pub status: GameStatus,
    pub revealed_word: Option<String>,
    pub started_at: String, // ISO 8601 string
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HintUnavailableReason {
    QuotaExhausted,
    NothingToReveal,
}

/// Notification for the player, e.g. a toast or a banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameNotice {
    CorrectGuess { letter: char, points: i32 },
    WrongGuess { letter: char, wrong_guesses: u32, remaining: u32 },
    HintGranted { letter: char, penalty: i32, hints_remaining: u32 },
    HintUnavailable { reason: HintUnavailableReason },
    Won { word: String, bonus: i32 },
    LostByGuesses { word: String },
    LostByTimeout { word: String },
    Restarted,
}

impl GameNotice {
    /// Display text for the notice.
    pub fn message(&self) -> String {
        match self {
            GameNotice::CorrectGuess { letter, .. } => format!(
                "Correct! \"{}\" is in the word.",
                letter.to_ascii_uppercase()
            ),
            GameNotice::WrongGuess { letter, .. } => format!(
                "Wrong! \"{}\" is not in the word.",
                letter.to_ascii_uppercase()
            ),
            GameNotice::HintGranted { letter, .. } => format!(
                "Hint used: The letter \"{}\" is revealed.",
                letter.to_ascii_uppercase()
            ),
            GameNotice::HintUnavailable {
                reason: HintUnavailableReason::NothingToReveal,
            } => "All letters have already been revealed!".to_string(),
            GameNotice::HintUnavailable {
                reason: HintUnavailableReason::QuotaExhausted,
            } => "No hints left for this game.".to_string(),
            GameNotice::Won { .. } => "Congratulations! You guessed the word!".to_string(),
            GameNotice::LostByGuesses { word } => {
                format!("Game Over! The word was \"{}\".", word.to_uppercase())
            }
            GameNotice::LostByTimeout { word } => {
                format!("Time's up! The word was \"{}\".", word.to_uppercase())
            }
            GameNotice::Restarted => "Game restarted! Good luck!".to_string(),
        }
    }
}
