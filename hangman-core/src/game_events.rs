use hangman_types::{GameNotice, HintUnavailableReason, SessionId};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted {
        session_id: SessionId,
        word_length: u32,
        hint: String,
    },
    CorrectGuess {
        session_id: SessionId,
        letter: char,
        points: i32,
    },
    WrongGuess {
        session_id: SessionId,
        letter: char,
        wrong_guesses: u32,
        remaining: u32,
    },
    HintGranted {
        session_id: SessionId,
        letter: char,
        penalty: i32,
        hints_remaining: u32,
    },
    HintUnavailable {
        session_id: SessionId,
        reason: HintUnavailableReason,
    },
    Won {
        session_id: SessionId,
        word: String,
        bonus: i32,
    },
    LostByGuesses {
        session_id: SessionId,
        word: String,
    },
    LostByTimeout {
        session_id: SessionId,
        word: String,
    },
    Restarted {
        session_id: SessionId,
    },
}

impl GameEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            GameEvent::SessionStarted { session_id, .. } => *session_id,
            GameEvent::CorrectGuess { session_id, .. } => *session_id,
            GameEvent::WrongGuess { session_id, .. } => *session_id,
            GameEvent::HintGranted { session_id, .. } => *session_id,
            GameEvent::HintUnavailable { session_id, .. } => *session_id,
            GameEvent::Won { session_id, .. } => *session_id,
            GameEvent::LostByGuesses { session_id, .. } => *session_id,
            GameEvent::LostByTimeout { session_id, .. } => *session_id,
            GameEvent::Restarted { session_id } => *session_id,
        }
    }

    /// The player-facing notice for this event. Session starts have none.
    pub fn notice(&self) -> Option<GameNotice> {
        let notice = match self {
            GameEvent::SessionStarted { .. } => return None,
            GameEvent::CorrectGuess { letter, points, .. } => GameNotice::CorrectGuess {
                letter: *letter,
                points: *points,
            },
            GameEvent::WrongGuess {
                letter,
                wrong_guesses,
                remaining,
                ..
            } => GameNotice::WrongGuess {
                letter: *letter,
                wrong_guesses: *wrong_guesses,
                remaining: *remaining,
            },
            GameEvent::HintGranted {
                letter,
                penalty,
                hints_remaining,
                ..
            } => GameNotice::HintGranted {
                letter: *letter,
                penalty: *penalty,
                hints_remaining: *hints_remaining,
            },
            GameEvent::HintUnavailable { reason, .. } => {
                GameNotice::HintUnavailable { reason: *reason }
            }
            GameEvent::Won { word, bonus, .. } => GameNotice::Won {
                word: word.clone(),
                bonus: *bonus,
            },
            GameEvent::LostByGuesses { word, .. } => GameNotice::LostByGuesses { word: word.clone() },
            GameEvent::LostByTimeout { word, .. } => GameNotice::LostByTimeout { word: word.clone() },
            GameEvent::Restarted { .. } => GameNotice::Restarted,
        };
        Some(notice)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameEvent::Won { .. } | GameEvent::LostByGuesses { .. } | GameEvent::LostByTimeout { .. }
        )
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Forwards events into a channel; a closed channel drops them.
pub struct ChannelEventHandler {
    sender: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelEventHandler {
    pub fn new(sender: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { sender }
    }
}

impl GameEventHandler for ChannelEventHandler {
    fn handle_event(&mut self, event: GameEvent) {
        let _ = self.sender.send(event);
    }
}
