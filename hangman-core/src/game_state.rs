use crate::{
    Countdown, GameEvent, GameEventBus, HintEngine, RandomSource, ScoreLedger, SessionStats,
    WordBank, WordEntry, CORRECT_GUESS_POINTS, HINT_PENALTY,
};
use chrono::{DateTime, Utc};
use hangman_types::{GameSnapshot, GameStatus, HintUnavailableReason, SessionId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub const MAX_WRONG: u32 = 6;
pub const MAX_HINTS: u32 = 3;
pub const INITIAL_TIME: u32 = 60;
pub const FREE_REVEALS: usize = 2;

/// State of one playthrough. Replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct GameState {
    pub word: String,
    pub hint: String,
    pub revealed_letters: HashSet<char>, // Always letters of `word`
    pub wrong_letters: HashSet<char>,
    pub wrong_guess_count: u32,
    pub hints_used: u32,
    pub timer: Countdown,
    pub status: GameStatus,
    pub started_at: DateTime<Utc>,
}

impl GameState {
    fn new(entry: &WordEntry, rng: &mut dyn RandomSource) -> Self {
        let word = entry.word.to_lowercase();
        let revealed_letters = HintEngine::free_reveals(&word, FREE_REVEALS, rng)
            .into_iter()
            .collect();

        let mut timer = Countdown::new(INITIAL_TIME);
        timer.start();

        Self {
            word,
            hint: entry.hint.clone(),
            revealed_letters,
            wrong_letters: HashSet::new(),
            wrong_guess_count: 0,
            hints_used: 0,
            timer,
            status: GameStatus::Active,
            started_at: Utc::now(),
        }
    }

    pub fn time_left(&self) -> u32 {
        self.timer.remaining()
    }

    pub fn is_word_revealed(&self) -> bool {
        self.word
            .chars()
            .all(|c| c == ' ' || self.revealed_letters.contains(&c))
    }

    pub fn was_guessed(&self, letter: char) -> bool {
        self.revealed_letters.contains(&letter) || self.wrong_letters.contains(&letter)
    }

    /// The word with unrevealed letters replaced by `_`.
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| {
                if c == ' ' || self.revealed_letters.contains(&c) {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    AlreadyGuessed,
    NotALetter,
    SessionOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    Granted(char),
    Unavailable(HintUnavailableReason),
    SessionOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { time_left: u32 },
    Finished(GameStatus),
    Paused,
    SessionOver,
}

/// The game engine for one mount: owns the current `GameState` plus the
/// counters that survive restarts.
///
/// Every mutation goes through `submit_guess`, `use_hint`, `tick` and
/// `restart`. Each runs to completion and, where it can end the game,
/// checks the end conditions in a fixed order: word revealed, then wrong
/// guesses exhausted, then time out. Only the first match is applied, and
/// only while the session is still `Active`.
pub struct GameSession {
    id: SessionId,
    state: GameState,
    ledger: ScoreLedger,
    word_bank: Arc<WordBank>,
    rng: Box<dyn RandomSource>,
    event_bus: GameEventBus,
    generation: u64,
}

impl GameSession {
    pub fn new(
        word_bank: Arc<WordBank>,
        mut rng: Box<dyn RandomSource>,
        ledger: ScoreLedger,
        event_bus: GameEventBus,
    ) -> Self {
        let state = GameState::new(word_bank.draw(rng.as_mut()), rng.as_mut());

        let mut session = Self {
            id: Uuid::new_v4(),
            state,
            ledger,
            word_bank,
            rng,
            event_bus,
            generation: 0,
        };
        session.announce_start();
        session.resolve_terminal();
        session
    }

    pub fn submit_guess(&mut self, letter: char) -> GuessOutcome {
        if self.state.status.is_terminal() {
            return GuessOutcome::SessionOver;
        }

        let letter = letter.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return GuessOutcome::NotALetter;
        }
        if self.state.was_guessed(letter) {
            return GuessOutcome::AlreadyGuessed;
        }

        let outcome = if self.state.word.contains(letter) {
            self.state.revealed_letters.insert(letter);
            self.ledger.apply_delta(CORRECT_GUESS_POINTS);
            debug!(session = %self.id, %letter, "Correct guess");
            self.event_bus.publish(GameEvent::CorrectGuess {
                session_id: self.id,
                letter,
                points: CORRECT_GUESS_POINTS,
            });
            GuessOutcome::Correct
        } else {
            self.state.wrong_letters.insert(letter);
            self.state.wrong_guess_count += 1;
            self.ledger.apply_delta(0);
            debug!(session = %self.id, %letter, wrong = self.state.wrong_guess_count, "Wrong guess");
            self.event_bus.publish(GameEvent::WrongGuess {
                session_id: self.id,
                letter,
                wrong_guesses: self.state.wrong_guess_count,
                remaining: MAX_WRONG.saturating_sub(self.state.wrong_guess_count),
            });
            GuessOutcome::Wrong
        };

        self.resolve_terminal();
        outcome
    }

    pub fn use_hint(&mut self) -> HintOutcome {
        if self.state.status.is_terminal() {
            return HintOutcome::SessionOver;
        }

        if HintEngine::quota_exhausted(self.state.hints_used) {
            return self.hint_unavailable(HintUnavailableReason::QuotaExhausted);
        }

        let letter = match HintEngine::pick_hint_letter(
            &self.state.word,
            &self.state.revealed_letters,
            self.rng.as_mut(),
        ) {
            Some(letter) => letter,
            None => return self.hint_unavailable(HintUnavailableReason::NothingToReveal),
        };

        self.state.revealed_letters.insert(letter);
        self.state.hints_used += 1;
        self.ledger.apply_delta(-HINT_PENALTY);
        info!(session = %self.id, %letter, hints_used = self.state.hints_used, "Hint granted");
        self.event_bus.publish(GameEvent::HintGranted {
            session_id: self.id,
            letter,
            penalty: HINT_PENALTY,
            hints_remaining: HintEngine::hints_remaining(self.state.hints_used),
        });

        self.resolve_terminal();
        HintOutcome::Granted(letter)
    }

    /// One elapsed second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.status.is_terminal() {
            return TickOutcome::SessionOver;
        }
        if !self.state.timer.tick() {
            return TickOutcome::Paused;
        }

        match self.resolve_terminal() {
            Some(status) => TickOutcome::Finished(status),
            None => TickOutcome::Running {
                time_left: self.state.time_left(),
            },
        }
    }

    /// Abandon the current state and start over with a new word. Cumulative
    /// counters carry over; the session score does not.
    ///
    /// A word the free reveals uncover completely is won on the spot.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.ledger.reset_session();
        self.state = GameState::new(self.word_bank.draw(self.rng.as_mut()), self.rng.as_mut());

        info!(session = %self.id, generation = self.generation, "Session restarted");
        self.event_bus
            .publish(GameEvent::Restarted { session_id: self.id });
        self.announce_start();
        self.resolve_terminal();
    }

    /// Stop the countdown without ending the game. Returns `false` if the
    /// session is not active.
    pub fn pause(&mut self) -> bool {
        if self.state.status.is_terminal() {
            return false;
        }
        self.state.timer.pause();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.status.is_terminal() {
            return false;
        }
        self.state.timer.resume();
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut revealed_letters: Vec<char> = self.state.revealed_letters.iter().copied().collect();
        revealed_letters.sort_unstable();
        let mut wrong_letters: Vec<char> = self.state.wrong_letters.iter().copied().collect();
        wrong_letters.sort_unstable();
        let stats = self.ledger.stats();

        GameSnapshot {
            session_id: self.id,
            masked_word: self.state.masked_word(),
            word_length: self.state.word.chars().count() as u32,
            hint: self.state.hint.clone(),
            revealed_letters,
            wrong_letters,
            wrong_guesses: self.state.wrong_guess_count,
            max_wrong: MAX_WRONG,
            hints_used: self.state.hints_used,
            hints_remaining: HintEngine::hints_remaining(self.state.hints_used),
            score: self.ledger.score(),
            total_points: stats.total_points,
            games_played: stats.games_played,
            wins: stats.wins,
            losses: stats.losses,
            time_left: self.state.time_left(),
            timer_running: self.state.timer.is_running(),
            status: self.state.status,
            revealed_word: self
                .state
                .status
                .is_terminal()
                .then(|| self.state.word.clone()),
            started_at: self.state.started_at.to_rfc3339(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_active(&self) -> bool {
        !self.state.status.is_terminal()
    }

    pub fn is_timer_running(&self) -> bool {
        self.state.timer.is_running()
    }

    pub fn score(&self) -> i32 {
        self.ledger.score()
    }

    pub fn stats(&self) -> SessionStats {
        self.ledger.stats()
    }

    /// Bumped by every restart; ticks scheduled for an older generation
    /// must not be applied.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn hint_unavailable(&mut self, reason: HintUnavailableReason) -> HintOutcome {
        debug!(session = %self.id, ?reason, "Hint unavailable");
        self.event_bus.publish(GameEvent::HintUnavailable {
            session_id: self.id,
            reason,
        });
        HintOutcome::Unavailable(reason)
    }

    fn resolve_terminal(&mut self) -> Option<GameStatus> {
        if self.state.status.is_terminal() {
            return None;
        }

        let outcome = if self.state.is_word_revealed() {
            GameStatus::Won
        } else if self.state.wrong_guess_count >= MAX_WRONG {
            GameStatus::LostByGuesses
        } else if self.state.timer.is_expired() {
            GameStatus::LostByTimeout
        } else {
            return None;
        };

        self.finish(outcome);
        Some(outcome)
    }

    fn finish(&mut self, outcome: GameStatus) {
        self.state.status = outcome;
        self.state.timer.halt();
        let delta = self.ledger.record_outcome(outcome == GameStatus::Won);

        let session_id = self.id;
        let word = self.state.word.clone();
        let event = match outcome {
            GameStatus::Won => GameEvent::Won {
                session_id,
                word,
                bonus: delta,
            },
            GameStatus::LostByGuesses => GameEvent::LostByGuesses { session_id, word },
            GameStatus::LostByTimeout => GameEvent::LostByTimeout { session_id, word },
            GameStatus::Active => return,
        };

        info!(session = %self.id, ?outcome, score = self.ledger.score(), "Game over");
        self.event_bus.publish(event);
    }

    fn announce_start(&mut self) {
        debug!(session = %self.id, word_length = self.state.word.len(), "Session started");
        self.event_bus.publish(GameEvent::SessionStarted {
            session_id: self.id,
            word_length: self.state.word.chars().count() as u32,
            hint: self.state.hint.clone(),
        });
    }
}
