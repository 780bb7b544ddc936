use tracing::{debug, info};

use hangman_core::{GuessOutcome, HintOutcome, SessionHandle};
use hangman_types::{ClientMessage, GameError, SessionId};

/// Turns client messages into commands on the connection's session.
///
/// State changes reach the client through the snapshot and notice streams,
/// so handlers only report failures.
#[derive(Clone)]
pub struct MessageHandler {
    session_id: SessionId,
    session: SessionHandle,
}

impl MessageHandler {
    pub fn new(session_id: SessionId, session: SessionHandle) -> Self {
        Self {
            session_id,
            session,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), GameError> {
        match message {
            ClientMessage::Guess { letter } => self.handle_guess(letter).await,
            ClientMessage::UseHint => self.handle_use_hint().await,
            ClientMessage::Restart => self.handle_restart().await,
            ClientMessage::Pause => self.handle_pause().await,
            ClientMessage::Resume => self.handle_resume().await,
            ClientMessage::Heartbeat => Ok(()),
        }
    }

    async fn handle_guess(&self, input: String) -> Result<(), GameError> {
        let letter = parse_letter(&input)?;
        let outcome = self.session.guess(letter).await.map_err(closed)?;

        match outcome {
            GuessOutcome::Correct | GuessOutcome::Wrong => {}
            ignored => debug!(session = %self.session_id, %letter, ?ignored, "Guess ignored"),
        }
        Ok(())
    }

    async fn handle_use_hint(&self) -> Result<(), GameError> {
        if let HintOutcome::SessionOver = self.session.use_hint().await.map_err(closed)? {
            debug!(session = %self.session_id, "Hint requested after game over");
        }
        Ok(())
    }

    async fn handle_restart(&self) -> Result<(), GameError> {
        info!(session = %self.session_id, "Client requested restart");
        self.session.restart().await.map_err(closed)
    }

    async fn handle_pause(&self) -> Result<(), GameError> {
        self.session.pause().await.map_err(closed)?;
        Ok(())
    }

    async fn handle_resume(&self) -> Result<(), GameError> {
        self.session.resume().await.map_err(closed)?;
        Ok(())
    }
}

/// A guess must be exactly one ASCII letter, in either case.
pub fn parse_letter(input: &str) -> Result<char, GameError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter.to_ascii_lowercase()),
        _ => Err(GameError::InvalidLetter {
            input: input.to_string(),
        }),
    }
}

fn closed(_: hangman_core::SessionClosed) -> GameError {
    GameError::SessionClosed
}
