// src/state.rs

use std::sync::Arc;

use conybot_core::chat::{LineChatService, WebChatService};
use conybot_core::repositories::CouponStore;
use conybot_core::services::GameService;

use crate::line::LineClient;

/// Everything the handlers need, built once in `main` and shared via
/// axum `State`.
pub struct AppState {
    pub coupons: Arc<dyn CouponStore>,
    pub game: GameService,
    pub web_chat: WebChatService,
    pub line_chat: LineChatService,
    pub line_client: LineClient,
    pub channel_secret: String,
}
