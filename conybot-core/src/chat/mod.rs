// src/chat/mod.rs

pub mod client;
pub mod router;
pub mod transport;

use std::sync::Arc;

pub use client::{Apologies, CompletionClient, CompletionConfig};
pub use router::MessageRouter;
pub use transport::{
    CompletionHttpResponse, CompletionTransport, MockCompletionTransport,
    ReqwestCompletionTransport, TransportError,
};

use crate::persona::Persona;

/// Apology pair for the web persona.
pub const WEB_APOLOGY_UNREACHABLE: &str =
    "Cony 暫時連不上粉紅雲端，先跟你大大抱歉！稍後再試一次好嗎？";
pub const WEB_APOLOGY_UNEXPECTED: &str = "Cony 今天有點累，幫我跟 Brown 說我晚點回來～";

/// Apology pair for the LINE duty persona.
pub const LINE_APOLOGY_UNREACHABLE: &str =
    "Cony 暫時連不上粉紅雲端，先跟你抱歉！稍後再試一次好嗎？";
pub const LINE_APOLOGY_UNEXPECTED: &str = "Cony 今天有點累，等我補妝一下再回你～";

pub fn web_apologies() -> Apologies {
    Apologies {
        unreachable: WEB_APOLOGY_UNREACHABLE.to_string(),
        unexpected: WEB_APOLOGY_UNEXPECTED.to_string(),
    }
}

pub fn line_apologies() -> Apologies {
    Apologies {
        unreachable: LINE_APOLOGY_UNREACHABLE.to_string(),
        unexpected: LINE_APOLOGY_UNEXPECTED.to_string(),
    }
}

/// Leisure chat persona exposed on the web frontend. Wraps the user text
/// in a fixed instruction before the completion call.
pub struct WebChatService {
    client: CompletionClient,
}

impl WebChatService {
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        config: CompletionConfig,
        persona: Persona,
    ) -> Self {
        Self {
            client: CompletionClient::new(transport, config, persona, web_apologies()),
        }
    }

    pub async fn generate_reply(&self, user_text: &str) -> String {
        let wrapped = format!(
            "User said: {user_text}. Reply as Cony in Traditional Chinese, be concise \
             but expressive."
        );
        self.client.generate_reply(&wrapped).await
    }
}

/// Duty persona behind the LINE webhook. Routes the raw text through the
/// keyword table first, then forwards the rewritten prompt.
pub struct LineChatService {
    client: CompletionClient,
    router: MessageRouter,
}

impl LineChatService {
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        config: CompletionConfig,
        persona: Persona,
    ) -> Self {
        Self {
            client: CompletionClient::new(transport, config, persona, line_apologies()),
            router: MessageRouter::new(),
        }
    }

    pub async fn generate_reply(&self, user_text: &str) -> String {
        let prepared = self.router.prepare(user_text);
        self.client.generate_reply(&prepared).await
    }
}
