use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use warp::test::{ws, WsClient};

use crate::create_routes;
use hangman_core::{WordBank, WordEntry};
use hangman_types::{
    ClientMessage, GameError, GameNotice, GameSnapshot, GameStatus, ServerMessage,
};

async fn connect() -> WsClient {
    let bank = WordBank::new(vec![WordEntry::new(
        "api",
        "Interface for communication between software components.",
    )])
    .unwrap();

    ws().path("/ws")
        .handshake(create_routes(Arc::new(bank)))
        .await
        .expect("WebSocket handshake failed")
}

async fn send(client: &mut WsClient, message: ClientMessage) {
    client
        .send_text(serde_json::to_string(&message).unwrap())
        .await;
}

async fn next_message(client: &mut WsClient) -> ServerMessage {
    let msg = timeout(Duration::from_secs(2), client.recv())
        .await
        .expect("Timeout waiting for server message")
        .expect("WebSocket error");
    serde_json::from_str(msg.to_str().unwrap()).expect("Should be valid ServerMessage")
}

/// Reads messages until one matches, returning everything read on the way.
async fn collect_until(
    client: &mut WsClient,
    done: impl Fn(&ServerMessage) -> bool,
) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    loop {
        let message = next_message(client).await;
        let finished = done(&message);
        messages.push(message);
        if finished {
            return messages;
        }
    }
}

async fn initial_state(client: &mut WsClient) -> GameSnapshot {
    match next_message(client).await {
        ServerMessage::StateUpdate { state } => state,
        other => panic!("Expected initial state, got: {:?}", other),
    }
}

fn hidden_letter(state: &GameSnapshot) -> char {
    let position = state.masked_word.find('_').expect("one letter is hidden");
    "api".chars().nth(position).unwrap()
}

fn score_deltas(messages: &[ServerMessage]) -> Vec<i32> {
    messages
        .iter()
        .filter_map(|m| match m {
            ServerMessage::ScoreRecorded { points } => Some(*points),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_connect_sends_initial_state() {
    let mut client = connect().await;

    let state = initial_state(&mut client).await;
    assert_eq!(state.status, GameStatus::Active);
    assert_eq!(state.word_length, 3);
    assert_eq!(state.masked_word.matches('_').count(), 1);
    assert_eq!(state.revealed_letters.len(), 2);
    assert_eq!(state.time_left, 60);
    assert_eq!(state.revealed_word, None);
}

#[tokio::test]
async fn test_wrong_guess_flow() {
    let mut client = connect().await;
    initial_state(&mut client).await;

    send(
        &mut client,
        ClientMessage::Guess {
            letter: "z".to_string(),
        },
    )
    .await;

    let messages = collect_until(&mut client, |m| {
        matches!(m, ServerMessage::StateUpdate { state } if state.wrong_guesses == 1)
    })
    .await;

    assert_eq!(score_deltas(&messages), vec![0]);
    assert!(messages.iter().any(|m| matches!(
        m,
        ServerMessage::Notice {
            notice: GameNotice::WrongGuess {
                letter: 'z',
                wrong_guesses: 1,
                remaining: 5
            }
        }
    )));
    match messages.last() {
        Some(ServerMessage::StateUpdate { state }) => {
            assert_eq!(state.wrong_letters, vec!['z']);
            assert_eq!(state.status, GameStatus::Active);
        }
        other => panic!("Expected state update, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_winning_guess_reports_score_and_word() {
    let mut client = connect().await;
    let state = initial_state(&mut client).await;
    let letter = hidden_letter(&state);

    send(
        &mut client,
        ClientMessage::Guess {
            letter: letter.to_ascii_uppercase().to_string(),
        },
    )
    .await;

    let messages = collect_until(&mut client, |m| {
        matches!(m, ServerMessage::StateUpdate { state } if state.status == GameStatus::Won)
    })
    .await;

    assert_eq!(score_deltas(&messages), vec![2, 10]);
    assert!(messages.iter().any(|m| matches!(
        m,
        ServerMessage::Notice { notice: GameNotice::Won { word, bonus: 10 } } if word == "api"
    )));
    match messages.last() {
        Some(ServerMessage::StateUpdate { state }) => {
            assert_eq!(state.revealed_word.as_deref(), Some("api"));
            assert_eq!(state.score, 12);
            assert_eq!(state.wins, 1);
            assert!(!state.timer_running);
        }
        other => panic!("Expected state update, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_hint_costs_points() {
    let mut client = connect().await;
    initial_state(&mut client).await;

    send(&mut client, ClientMessage::UseHint).await;

    // The hint reveals the last letter, so the game is won too
    let messages = collect_until(&mut client, |m| {
        matches!(m, ServerMessage::StateUpdate { state } if state.hints_used == 1)
    })
    .await;

    assert_eq!(score_deltas(&messages), vec![-2, 10]);
    assert!(messages.iter().any(|m| matches!(
        m,
        ServerMessage::Notice {
            notice: GameNotice::HintGranted { penalty: 2, hints_remaining: 2, .. }
        }
    )));
}

#[tokio::test]
async fn test_invalid_letter_returns_error() {
    let mut client = connect().await;
    initial_state(&mut client).await;

    send(
        &mut client,
        ClientMessage::Guess {
            letter: "ab".to_string(),
        },
    )
    .await;

    let messages = collect_until(&mut client, |m| matches!(m, ServerMessage::Error { .. })).await;
    assert!(matches!(
        messages.last(),
        Some(ServerMessage::Error {
            error: GameError::InvalidLetter { input }
        }) if input == "ab"
    ));
}

#[tokio::test]
async fn test_malformed_json_keeps_connection_open() {
    let mut client = connect().await;
    initial_state(&mut client).await;

    client.send_text("invalid json").await;
    let messages = collect_until(&mut client, |m| matches!(m, ServerMessage::Error { .. })).await;
    assert!(matches!(
        messages.last(),
        Some(ServerMessage::Error {
            error: GameError::InvalidMessage { .. }
        })
    ));

    send(
        &mut client,
        ClientMessage::Guess {
            letter: "z".to_string(),
        },
    )
    .await;
    collect_until(&mut client, |m| {
        matches!(
            m,
            ServerMessage::Notice {
                notice: GameNotice::WrongGuess { .. }
            }
        )
    })
    .await;
}

#[tokio::test]
async fn test_restart_starts_a_fresh_game() {
    let mut client = connect().await;
    initial_state(&mut client).await;

    send(
        &mut client,
        ClientMessage::Guess {
            letter: "z".to_string(),
        },
    )
    .await;
    send(&mut client, ClientMessage::Restart).await;

    let messages = collect_until(&mut client, |m| {
        matches!(
            m,
            ServerMessage::Notice {
                notice: GameNotice::Restarted
            }
        )
    })
    .await;
    assert!(score_deltas(&messages).contains(&0));

    let messages = collect_until(&mut client, |m| {
        matches!(m, ServerMessage::StateUpdate { state } if state.wrong_guesses == 0)
    })
    .await;
    match messages.last() {
        Some(ServerMessage::StateUpdate { state }) => {
            assert_eq!(state.status, GameStatus::Active);
            assert!(state.wrong_letters.is_empty());
            assert_eq!(state.games_played, 0);
            assert_eq!(state.time_left, 60);
        }
        other => panic!("Expected state update, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_pause_stops_the_clock() {
    let mut client = connect().await;
    initial_state(&mut client).await;

    send(&mut client, ClientMessage::Pause).await;
    let messages = collect_until(&mut client, |m| {
        matches!(m, ServerMessage::StateUpdate { state } if !state.timer_running)
    })
    .await;

    match messages.last() {
        Some(ServerMessage::StateUpdate { state }) => {
            assert_eq!(state.status, GameStatus::Active);
        }
        other => panic!("Expected state update, got: {:?}", other),
    }
}
