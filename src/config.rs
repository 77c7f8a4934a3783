use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub token: Option<String>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: None,
            user_agent: default_user_agent(),
        }
    }

    /// Reads `INFOMART_*` variables, loading `.env` first when present.
    pub fn init() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url =
            std::env::var("INFOMART_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs: u64 = match std::env::var("INFOMART_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("INFOMART_TIMEOUT_SECS must be a number, got {value:?}"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let token = std::env::var("INFOMART_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let user_agent =
            std::env::var("INFOMART_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            token,
            user_agent,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn default_user_agent() -> String {
    format!("infomart/{}", env!("CARGO_PKG_VERSION"))
}
