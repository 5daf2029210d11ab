use std::{collections::HashMap, env, net::SocketAddr, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai";
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com";
pub const DEFAULT_LIVENESS_ADDR: &str = "0.0.0.0:8080";

/// Typed configuration, read from the environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram
    pub telegram_token: String,

    // Completion API
    pub openrouter_api_key: String,
    pub openrouter_model: String,
    pub openrouter_base_url: String,

    // Price API
    pub coingecko_base_url: String,

    // Outbound HTTP; `None` keeps the client default.
    pub http_timeout: Option<Duration>,

    // Liveness
    pub liveness_addr: SocketAddr,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Existing env always wins over `.env`.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(Error::Config(format!("failed to read .env: {e}")));
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let telegram_token = get("TELEGRAM_TOKEN").ok_or_else(|| {
            Error::Config("TELEGRAM_TOKEN environment variable is required".to_string())
        })?;
        let openrouter_api_key = get("OPENROUTER_API_KEY").ok_or_else(|| {
            Error::Config("OPENROUTER_API_KEY environment variable is required".to_string())
        })?;

        let openrouter_model =
            get("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string());
        let openrouter_base_url = trim_base_url(
            get("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
        );
        let coingecko_base_url = trim_base_url(
            get("COINGECKO_BASE_URL").unwrap_or_else(|| DEFAULT_COINGECKO_BASE_URL.to_string()),
        );

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("HTTP_TIMEOUT_SECS is not a number: {raw}"))
            })?)),
            None => None,
        };

        let raw_addr = get("LIVENESS_ADDR").unwrap_or_else(|| DEFAULT_LIVENESS_ADDR.to_string());
        let liveness_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("LIVENESS_ADDR is invalid ({raw_addr}): {e}")))?;

        Ok(Self {
            telegram_token,
            openrouter_api_key,
            openrouter_model,
            openrouter_base_url,
            coingecko_base_url,
            http_timeout,
            liveness_addr,
        })
    }

    /// Same as [`Config::from_lookup`] over a fixed map.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
