// src/chat/client.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::warn;

use crate::persona::Persona;

use super::transport::{CompletionTransport, TransportError};

/// Configuration for the completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Base URL for API requests, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    /// Optional `X-User-Id` header for proxy-side accounting.
    pub user_id: Option<String>,
    /// Optional `X-Title` header identifying the calling app.
    pub app_title: Option<String>,
    pub timeout: Duration,
}

impl CompletionConfig {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_base = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: "gpt-4o".to_string(),
            user_id: None,
            app_title: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// The two fixed in-character fallback strings a chat service answers with
/// when the completion call fails. `unreachable` covers transport failures,
/// `unexpected` everything else (API error payloads, malformed bodies).
#[derive(Debug, Clone)]
pub struct Apologies {
    pub unreachable: String,
    pub unexpected: String,
}

/// Client for the chat-completion endpoint. Builds a two-turn prompt
/// (persona system text + user turn), performs a single attempt with a
/// bounded timeout, and absorbs every failure into one of two fixed
/// apology strings. `generate_reply` never fails past this boundary.
pub struct CompletionClient {
    transport: Arc<dyn CompletionTransport>,
    config: CompletionConfig,
    persona: Persona,
    apologies: Apologies,
}

impl CompletionClient {
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        config: CompletionConfig,
        persona: Persona,
        apologies: Apologies,
    ) -> Self {
        Self {
            transport,
            config,
            persona,
            apologies,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }

    fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.config.api_key),
        );
        if let Some(user_id) = &self.config.user_id {
            headers.insert("X-User-Id".to_string(), user_id.clone());
        }
        if let Some(title) = &self.config.app_title {
            headers.insert("X-Title".to_string(), title.clone());
        }
        headers
    }

    fn build_payload(&self, user_text: &str) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": self.persona.text() },
                { "role": "user", "content": user_text },
            ],
            "temperature": 0.85,
            "max_tokens": 300,
        })
    }

    /// Single-attempt completion call. Transport failures return the first
    /// apology string; any other failure (non-2xx status, body without
    /// `choices[0].message.content`) returns the second.
    pub async fn generate_reply(&self, user_text: &str) -> String {
        let payload = self.build_payload(user_text);
        let response = self
            .transport
            .post_json(
                self.endpoint(),
                self.headers(),
                payload,
                self.config.timeout,
            )
            .await;

        let response = match response {
            Ok(r) => r,
            Err(TransportError::Transport(e)) => {
                warn!("Completion endpoint unreachable: {}", e);
                return self.apologies.unreachable.clone();
            }
            Err(TransportError::Malformed(e)) => {
                warn!("Completion response unusable: {}", e);
                return self.apologies.unexpected.clone();
            }
        };

        if !(200..300).contains(&response.status) {
            warn!("Completion endpoint returned status {}", response.status);
            return self.apologies.unexpected.clone();
        }

        match response.body["choices"][0]["message"]["content"].as_str() {
            Some(content) => content.trim().to_string(),
            None => {
                warn!("Completion response missing message content");
                self.apologies.unexpected.clone()
            }
        }
    }
}
