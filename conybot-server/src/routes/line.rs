// src/routes/line.rs

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::{Value, json};
use tracing::warn;

use conybot_common::Error;

use crate::line::{WebhookPayload, verify_signature};
use crate::routes::ApiError;
use crate::state::AppState;

/// LINE webhook: verify the signed body, then answer each text-message
/// event through the duty chat pipeline with one outbound reply.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::Signature("missing x-line-signature header".to_string()))?;

    if let Err(e) = verify_signature(&state.channel_secret, &body, signature) {
        warn!("Invalid LINE signature: {}", e);
        return Err(e.into());
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| Error::Validation(format!("malformed webhook body: {e}")))?;

    let received = payload.events.len();
    for event in &payload.events {
        let (Some(text), Some(reply_token)) = (event.text_message(), event.reply_token.as_deref())
        else {
            continue;
        };
        let reply_text = state.line_chat.generate_reply(text).await;
        state.line_client.reply_text(reply_token, &reply_text).await?;
    }

    Ok(Json(json!({ "received_events": received })))
}
