//! HTTP request handlers

use super::AppState;
use crate::error::{ApiError, ApiResult};
use crate::game::{parse_count, GameSnapshot, Outcome};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub title: String,
}

/// A count as typed by the player: a JSON number or raw text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CountInput {
    Number(f64),
    Text(String),
}

impl CountInput {
    fn resolve(&self) -> usize {
        match self {
            CountInput::Number(n) if n.is_finite() && *n > 0.0 => *n as usize,
            CountInput::Number(_) => 0,
            CountInput::Text(raw) => parse_count(raw),
        }
    }
}

/// Omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct ConfigRequest {
    #[serde(default)]
    pub number_of_cards: Option<CountInput>,
    #[serde(default)]
    pub number_of_movies: Option<CountInput>,
}

#[derive(Debug, Serialize)]
pub struct ClickResult {
    /// accepted, won or lost
    pub result: &'static str,
    pub score: usize,
    pub high_score: usize,
    /// Player-facing notification for round ends
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub click: ClickResult,
    pub game: GameSnapshot,
}

// ============================================================================
// Game Endpoints
// ============================================================================

/// GET /api/game - current score, difficulty and cards on screen
pub async fn get_game(State(state): State<AppState>) -> Json<GameSnapshot> {
    Json(state.session.snapshot().await)
}

/// POST /api/click - click a card by title
pub async fn click_card(
    State(state): State<AppState>,
    Json(req): Json<ClickRequest>,
) -> ApiResult<Json<ClickResponse>> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let (outcome, game) = state.session.click(&req.title).await?;

    let click = match outcome {
        Outcome::Accepted { score } => ClickResult {
            result: "accepted",
            score,
            high_score: game.high_score,
            message: None,
        },
        Outcome::Won { score, high_score } => ClickResult {
            result: "won",
            score,
            high_score,
            message: Some(format!(
                "You win! You clicked all {} movies without a repeat.",
                score
            )),
        },
        Outcome::Lost {
            score, high_score, ..
        } => ClickResult {
            result: "lost",
            score,
            high_score,
            message: Some("Game over! You clicked the same card twice.".to_string()),
        },
        other => {
            return Err(ApiError::Internal(format!(
                "unexpected click outcome: {:?}",
                other
            )))
        }
    };

    Ok(Json(ClickResponse { click, game }))
}

/// POST /api/config - change number of visible cards and pool size
pub async fn set_config(
    State(state): State<AppState>,
    Json(req): Json<ConfigRequest>,
) -> Json<GameSnapshot> {
    let number_of_cards = req.number_of_cards.as_ref().map(CountInput::resolve);
    let number_of_movies = req.number_of_movies.as_ref().map(CountInput::resolve);

    info!(?number_of_cards, ?number_of_movies, "Configuration change requested");
    Json(state.session.configure(number_of_cards, number_of_movies).await)
}

/// POST /api/reload - fetch and validate the catalog again
pub async fn reload_catalog(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    info!("Catalog reload requested");
    state.session.reload();
    (StatusCode::ACCEPTED, Json(json!({ "status": "loading" })))
}
