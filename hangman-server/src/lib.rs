use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use warp::Filter;

use crate::config::Config;
use hangman_core::WordBank;

pub mod config;
pub mod websocket;

/// The word list named by `WORDS_FILE`, or the built-in tech words.
pub fn load_word_bank(config: &Config) -> anyhow::Result<WordBank> {
    match &config.words_file {
        Some(path) => WordBank::from_file(path)
            .with_context(|| format!("Failed to load words from {}", path.display())),
        None => {
            let bank = WordBank::builtin().context("Built-in word list is invalid")?;
            info!("Using built-in word list with {} entries", bank.len());
            Ok(bank)
        }
    }
}

pub fn create_routes(
    word_bank: Arc<WordBank>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let word_bank_filter = warp::any().map(move || word_bank.clone());

    // WebSocket endpoint, one game session per connection
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(word_bank_filter)
        .map(|ws: warp::ws::Ws, word_bank: Arc<WordBank>| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, word_bank))
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET"]);

    websocket
        .or(health)
        .with(cors)
        .with(warp::log("hangman"))
}
