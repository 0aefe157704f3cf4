// src/line/events.rs

use serde::Deserialize;

/// Webhook body: a batch of events plus the destination bot id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Text of a `message`-type event carrying a text message, if any.
    pub fn text_message(&self) -> Option<&str> {
        if self.event_type != "message" {
            return None;
        }
        self.message
            .as_ref()
            .filter(|m| m.message_type == "text")
            .and_then(|m| m.text.as_deref())
    }
}
