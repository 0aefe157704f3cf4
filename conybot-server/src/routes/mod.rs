// src/routes/mod.rs

pub mod info;
pub mod line;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use conybot_common::Error;

use crate::state::AppState;

/// Wraps the crate error so handlers can use `?`; maps variants to
/// protocol statuses at the boundary.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) | Error::Signature(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = axum::Json(json!({ "detail": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(info::health))
        .route("/coupons", get(info::view_coupons))
        .route("/chat-with-cony", post(info::chat_with_cony))
        .route("/play-with-cony", post(info::play_with_cony))
        .route("/callback", post(line::callback))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
