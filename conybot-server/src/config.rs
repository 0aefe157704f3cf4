// src/config.rs

use std::env;
use std::time::Duration;

use conybot_common::Error;

/// Everything the server reads from the environment, resolved once at
/// startup and passed down explicitly. No ambient lookups after this.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub openai_user_id: Option<String>,
    pub openai_app_title: Option<String>,
    pub line_channel_access_token: String,
    pub line_channel_secret: String,
    pub line_api_timeout: Duration,
    pub default_user_id: String,
}

fn required(key: &str) -> Result<String, Error> {
    env::var(key).map_err(|_| Error::Validation(format!("missing environment variable {key}")))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

impl Settings {
    pub fn from_env() -> Result<Self, Error> {
        let line_api_timeout = optional("LINE_API_TIMEOUT")
            .map(|raw| {
                raw.parse::<f64>()
                    .map_err(|_| Error::Validation(format!("LINE_API_TIMEOUT '{raw}' is not a number")))
            })
            .transpose()?
            .map(Duration::from_secs_f64)
            .unwrap_or(Duration::from_secs(10));

        Ok(Self {
            app_name: optional("APP_NAME").unwrap_or_else(|| "Cony Assistant".to_string()),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_api_base: optional("OPENAI_API_BASE")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            openai_user_id: optional("OPENAI_USER_ID"),
            openai_app_title: optional("OPENAI_APP_TITLE"),
            line_channel_access_token: required("LINE_CHANNEL_ACCESS_TOKEN")?,
            line_channel_secret: required("LINE_CHANNEL_SECRET")?,
            line_api_timeout,
            default_user_id: optional("DEFAULT_USER_ID")
                .unwrap_or_else(|| "cony-demo-user".to_string()),
        })
    }
}
