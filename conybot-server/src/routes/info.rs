// src/routes/info.rs

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use conybot_common::Error;
use conybot_common::models::GameChoice;

use crate::routes::ApiError;
use crate::state::AppState;

const MAX_MESSAGE_LEN: usize = 300;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn view_coupons(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let coupons = state.coupons.list().await?;
    Ok(Json(json!({ "coupons": coupons })))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

pub async fn chat_with_cony(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
    let length = payload.message.chars().count();
    if length == 0 || length > MAX_MESSAGE_LEN {
        return Err(Error::Validation(format!(
            "message must be between 1 and {MAX_MESSAGE_LEN} characters"
        ))
        .into());
    }

    let reply = state.web_chat.generate_reply(&payload.message).await;
    Ok(Json(json!({ "reply": reply })))
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub player_choice: String,
}

pub async fn play_with_cony(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlayRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = state.game.play_round(&payload.player_choice).await?;

    Ok(Json(json!({
        "player_choice": result.player_choice,
        "cony_choice": result.cony_choice,
        "did_win": result.did_win,
        "reward": result.reward,
        "available_choices": GameChoice::ALL,
    })))
}
