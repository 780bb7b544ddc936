#![allow(dead_code)]

use hangman_core::{
    GameEvent, GameEventBus, GameEventHandler, GameSession, ScoreLedger, ScriptedRandom, WordBank,
    WordEntry,
};
use std::sync::{Arc, Mutex};

/// Creates a bank holding a single word, so every draw is predictable
pub fn create_single_word_bank(word: &str, hint: &str) -> Arc<WordBank> {
    Arc::new(WordBank::new(vec![WordEntry::new(word, hint)]).unwrap())
}

/// Creates a small bank of known tech words
pub fn create_test_bank() -> Arc<WordBank> {
    let word_list = "api|Interface for communication between software components.\n\
                     rust|Systems programming language focused on speed and safety.\n\
                     big data|Massive datasets requiring advanced processing methods.";
    Arc::new(WordBank::from_word_list(word_list).unwrap())
}

/// Records every delta handed to the score sink
#[derive(Clone, Default)]
pub struct RecordingSink {
    deltas: Arc<Mutex<Vec<i32>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deltas(&self) -> Vec<i32> {
        self.deltas.lock().unwrap().clone()
    }

    pub fn total(&self) -> i32 {
        self.deltas.lock().unwrap().iter().sum()
    }

    pub fn ledger(&self) -> ScoreLedger {
        let deltas = self.deltas.clone();
        ScoreLedger::new(Box::new(move |points: i32| {
            deltas.lock().unwrap().push(points)
        }))
    }
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_event(&self) -> Option<GameEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    pub fn count(&self, check_fn: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Everything a test needs to observe a session from the outside
pub struct TestSession {
    pub session: GameSession,
    pub sink: RecordingSink,
    pub events: EventCollector,
}

/// Creates a session on `word` with a scripted random source. The first
/// scripted value picks the word, the following ones the free reveals.
pub fn create_session(word: &str, script: Vec<usize>) -> TestSession {
    let sink = RecordingSink::new();
    let events = EventCollector::new();
    let mut event_bus = GameEventBus::new();
    event_bus.add_handler(Box::new(events.clone()));

    let session = GameSession::new(
        create_single_word_bank(word, "test hint"),
        Box::new(ScriptedRandom::new(script)),
        sink.ledger(),
        event_bus,
    );

    TestSession {
        session,
        sink,
        events,
    }
}

/// Guesses every letter of the session's word that is not yet revealed
pub fn guess_remaining_letters(session: &mut GameSession) {
    let word = session.state().word.clone();
    for letter in word.chars().filter(|c| *c != ' ') {
        session.submit_guess(letter);
    }
}
