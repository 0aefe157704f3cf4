// src/line/client.rs

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use conybot_common::Error;

const REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

/// Outbound client for the LINE messaging API. Sends one text reply per
/// webhook event using the event's reply token.
pub struct LineClient {
    http: reqwest::Client,
    access_token: String,
    endpoint: String,
    timeout: Duration,
}

impl LineClient {
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token: access_token.into(),
            endpoint: REPLY_ENDPOINT.to_string(),
            timeout,
        }
    }

    /// Point the client at a different reply endpoint (tests, staging).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), Error> {
        let payload = json!({
            "replyToken": reply_token,
            "messages": [
                { "type": "text", "text": text },
            ],
        });

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Platform(format!(
                "LINE reply API returned {status}: {body}"
            )));
        }

        debug!("Sent LINE reply for token {}", reply_token);
        Ok(())
    }
}
