//! Request handling for the best-move service.
//!
//! The wire format is deliberately plain: the request body is the raw
//! 71-character board encoding, the response body is the 5-digit move
//! serialization (or empty when the game is already over).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use chess_core::Position;
use engine::Engine;
use tracing::{error, info, warn};

use crate::store::PositionStore;

pub const ENCODING_LEN: usize = 71;

#[derive(Clone)]
pub struct AppState {
    pub store: PositionStore,
    pub engine: Arc<Engine>,
    pub depth: u8,
}

pub fn router(store: PositionStore, engine: Arc<Engine>, depth: u8) -> Router {
    let state = AppState {
        store,
        engine,
        depth,
    };
    Router::new()
        .route("/getBestMove", post(get_best_move))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "Server is running!"
}

async fn get_best_move(State(state): State<AppState>, body: String) -> (StatusCode, String) {
    if body.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            "Bad Request: Empty input".to_string(),
        );
    }
    if body.len() != ENCODING_LEN {
        return (
            StatusCode::BAD_REQUEST,
            "Bad Request: Invalid input".to_string(),
        );
    }

    // A cache failure is not worth failing the request over; fall through
    // to a fresh search instead.
    match state.store.lookup(&body).await {
        Ok(Some((cached, score))) => {
            info!(best_move = %cached, score, "cache hit");
            return (StatusCode::OK, cached);
        }
        Ok(None) => {}
        Err(err) => warn!(%err, "cache lookup failed, searching anyway"),
    }

    let pos = match Position::from_encoding(&body) {
        Ok(pos) => pos,
        Err(err) => {
            warn!(%err, "rejected unparseable position");
            return (
                StatusCode::BAD_REQUEST,
                "Bad Request: Invalid input".to_string(),
            );
        }
    };

    // The search is CPU-bound for seconds at depth 5, keep it off the
    // async workers.
    let engine = Arc::clone(&state.engine);
    let depth = state.depth;
    let searched = tokio::task::spawn_blocking(move || engine.best_move(&pos, depth)).await;

    let outcome = match searched {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(%err, "search task failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            );
        }
    };

    let Some((best, score)) = outcome else {
        info!("no legal moves, game is already over");
        return (StatusCode::OK, String::new());
    };

    let serialized = best.to_string();
    if let Err(err) = state.store.insert(&body, &serialized, score as f64).await {
        warn!(%err, "failed to cache search result");
    }
    info!(best_move = %serialized, score, depth, "search complete");
    (StatusCode::OK, serialized)
}
