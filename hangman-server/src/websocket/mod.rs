use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use hangman_core::{
    spawn_session, GameEvent, GameEventBus, GameEventHandler, GameSession, RunningSession,
    ScoreLedger, ThreadRandom, WordBank,
};
use hangman_types::{ClientMessage, GameError, ServerMessage};

pub mod handlers;
pub mod rate_limiter;

#[cfg(test)]
mod integration_tests;

use handlers::MessageHandler;
use rate_limiter::RateLimiter;

/// Relays session events to the client as notices.
struct NoticeForwarder {
    outgoing: mpsc::UnboundedSender<ServerMessage>,
}

impl GameEventHandler for NoticeForwarder {
    fn handle_event(&mut self, event: GameEvent) {
        if let Some(notice) = event.notice() {
            let _ = self.outgoing.send(ServerMessage::Notice { notice });
        }
    }
}

/// One WebSocket connection plays one session, from connect until the
/// socket closes.
pub async fn handle_connection(websocket: WebSocket, word_bank: Arc<WordBank>) {
    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let (outgoing, mut outgoing_receiver) = mpsc::unbounded_channel::<ServerMessage>();

    let ledger = {
        let outgoing = outgoing.clone();
        ScoreLedger::new(Box::new(move |points: i32| {
            let _ = outgoing.send(ServerMessage::ScoreRecorded { points });
        }))
    };
    let mut event_bus = GameEventBus::new();
    event_bus.add_handler(Box::new(NoticeForwarder {
        outgoing: outgoing.clone(),
    }));

    let session = GameSession::new(word_bank, Box::new(ThreadRandom::new()), ledger, event_bus);
    let session_id = session.id();
    let RunningSession {
        handle,
        mut snapshots,
        task,
    } = spawn_session(session);
    info!("New WebSocket connection playing session {}", session_id);

    let state = snapshots.borrow_and_update().clone();
    let _ = outgoing.send(ServerMessage::StateUpdate { state });

    let message_handler = MessageHandler::new(session_id, handle);

    // Handle incoming messages
    let incoming_handler = {
        let outgoing = outgoing.clone();
        let mut rate_limiter = RateLimiter::new();

        async move {
            while let Some(result) = ws_receiver.next().await {
                let msg = match result {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!("WebSocket error for session {}: {}", session_id, e);
                        break;
                    }
                };
                if msg.is_close() {
                    break;
                }

                if let Err(error) = handle_message(msg, &mut rate_limiter, &message_handler).await
                {
                    let closed = error == GameError::SessionClosed;
                    let _ = outgoing.send(ServerMessage::Error { error });
                    if closed {
                        break;
                    }
                }
            }
        }
    };

    // Forward every published snapshot
    let snapshot_forwarder = {
        let outgoing = outgoing.clone();

        async move {
            while snapshots.changed().await.is_ok() {
                let state = snapshots.borrow_and_update().clone();
                if outgoing.send(ServerMessage::StateUpdate { state }).is_err() {
                    break;
                }
            }
        }
    };

    // Handle outgoing messages
    let outgoing_handler = async move {
        while let Some(message) = outgoing_receiver.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize message: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = ws_sender.send(Message::text(json)).await {
                warn!("Failed to send message for session {}: {:?}", session_id, e);
                break;
            }
        }
    };

    tokio::select! {
        _ = incoming_handler => {},
        _ = snapshot_forwarder => {},
        _ = outgoing_handler => {},
    }

    // The handle went down with the handlers, which stops the runner
    if let Err(e) = task.await {
        if !e.is_cancelled() {
            error!("Session runner for {} failed: {}", session_id, e);
        }
    }
    info!("Connection for session {} closed", session_id);
}

async fn handle_message(
    msg: Message,
    rate_limiter: &mut RateLimiter,
    message_handler: &MessageHandler,
) -> Result<(), GameError> {
    if !rate_limiter.try_acquire() {
        warn!("Rate limit exceeded");
        return Err(GameError::RateLimited);
    }

    // Only handle text messages
    if !msg.is_text() {
        return Ok(());
    }

    let text = msg.to_str().map_err(|_| GameError::InvalidMessage {
        reason: "not a text frame".to_string(),
    })?;

    let client_message: ClientMessage = serde_json::from_str(text).map_err(|e| {
        warn!("Rejected client message: {}", e);
        GameError::InvalidMessage {
            reason: e.to_string(),
        }
    })?;

    message_handler.handle_message(client_message).await
}
