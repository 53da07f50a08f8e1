//! HTTP surface: request handlers mapping 1:1 to state operations, and the
//! router wiring them together.
//!
//! Mutation endpoints parse their JSON body best-effort: malformed or missing
//! JSON behaves like an empty object and the request still succeeds with 204.
//! Nothing here produces a domain error response.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::pages;
use crate::state::AppState;
use crate::types::{Choice, Mode, Tally};

/// Fixed countdown length started by the admin button.
const COUNTDOWN_SECS: i64 = 60;

#[derive(Debug, Default, Deserialize)]
struct AnswerBody {
    answer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VoteBody {
    choice: Option<Choice>,
}

#[derive(Debug, Serialize)]
struct ResultsResponse {
    answers_text: Vec<String>,
    votes: Tally,
}

#[derive(Debug, Serialize)]
struct StateResponse {
    mode: Mode,
    /// Whole seconds until the deadline, `null` when no countdown is running.
    seconds_left: Option<i64>,
}

/// Decode a JSON body, falling back to the empty default on any parse failure.
/// An unrecognized vote choice fails deserialization and lands here too.
fn parse_or_default<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

/// POST /answer_text
async fn submit_answer(State(state): State<Arc<AppState>>, body: Bytes) -> StatusCode {
    let body: AnswerBody = parse_or_default(&body);
    if let Some(answer) = body.answer {
        tracing::debug!(len = answer.len(), "text answer received");
        state.submit_answer(&answer).await;
    }
    StatusCode::NO_CONTENT
}

/// POST /vote
async fn cast_vote(State(state): State<Arc<AppState>>, body: Bytes) -> StatusCode {
    let body: VoteBody = parse_or_default(&body);
    if let Some(choice) = body.choice {
        tracing::debug!(?choice, "vote received");
        state.cast_vote(choice).await;
    }
    StatusCode::NO_CONTENT
}

/// GET /results
async fn results(State(state): State<Arc<AppState>>) -> Json<ResultsResponse> {
    let (answers_text, votes) = state.results().await;
    Json(ResultsResponse {
        answers_text,
        votes,
    })
}

/// GET /state
async fn poll_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let status = state.status().await;
    Json(StateResponse {
        mode: status.mode,
        seconds_left: status.seconds_left,
    })
}

/// POST /admin/start_60
async fn start_countdown(State(state): State<Arc<AppState>>) -> StatusCode {
    tracing::info!(secs = COUNTDOWN_SECS, "admin started countdown");
    state.start_countdown(COUNTDOWN_SECS).await;
    StatusCode::NO_CONTENT
}

/// POST /admin/show_results
async fn show_results(State(state): State<Arc<AppState>>) -> StatusCode {
    tracing::info!("admin switched to results mode");
    state.show_results().await;
    StatusCode::NO_CONTENT
}

/// POST /admin/reset
async fn reset(State(state): State<Arc<AppState>>) -> StatusCode {
    tracing::info!("admin reset the poll");
    state.reset().await;
    StatusCode::NO_CONTENT
}

/// Build the full application router around shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::serve_index))
        .route("/admin", get(pages::serve_admin))
        .route("/answer_text", post(submit_answer))
        .route("/vote", post(cast_vote))
        .route("/results", get(results))
        .route("/state", get(poll_state))
        .route("/admin/start_60", post(start_countdown))
        .route("/admin/show_results", post(show_results))
        .route("/admin/reset", post(reset))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
