//! Intent dispatch.
//!
//! A message is tried as arithmetic first, then as a `price <coin>` query, and
//! finally handed to the completion backend. The first interpretation that
//! applies produces the one and only reply.

use std::sync::Arc;

use crate::{
    calc,
    ports::{CompletionClient, PriceSource},
};

pub const RESULT_MARKER: &str = "📐 Result:";
pub const PRICE_MARKER: &str = "💰";
pub const PRICE_PREFIX: &str = "price ";
pub const PRICE_ERROR: &str = "Error fetching price.";
pub const COMPLETION_ERROR: &str = "Error: Could not get AI reply.";
pub const ASK_USAGE: &str = "Usage: /ask <question>";

/// What a message was classified as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Evaluated expression, already rendered.
    Arithmetic(String),
    /// `price <coin>`; `coin` is trimmed but otherwise as typed.
    Price { coin: String },
    /// Everything else goes to the completion backend.
    Prompt,
}

/// Classify `text` without touching the network.
pub fn classify(text: &str) -> Intent {
    let text = text.trim();

    if let Some(value) = calc::evaluate(text) {
        return Intent::Arithmetic(value);
    }

    if let Some(coin) = strip_price_prefix(text) {
        return Intent::Price {
            coin: coin.to_string(),
        };
    }

    Intent::Prompt
}

/// `"Price  bitcoin"` -> `Some("bitcoin")`. Prefix match is ASCII case-insensitive.
fn strip_price_prefix(text: &str) -> Option<&str> {
    let head = text.get(..PRICE_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(PRICE_PREFIX) {
        return None;
    }
    let coin = text[PRICE_PREFIX.len()..].trim();
    if coin.is_empty() {
        None
    } else {
        Some(coin)
    }
}

/// Join `/ask` arguments the way Telegram splits them: on any whitespace.
pub fn ask_query(args: &str) -> String {
    args.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The bot's brain: routes text to calculator, price lookup or completion.
#[derive(Clone)]
pub struct Assistant {
    prices: Arc<dyn PriceSource>,
    completions: Arc<dyn CompletionClient>,
}

impl Assistant {
    pub fn new(prices: Arc<dyn PriceSource>, completions: Arc<dyn CompletionClient>) -> Self {
        Self {
            prices,
            completions,
        }
    }

    /// Produce exactly one reply for a free-form text message.
    pub async fn reply(&self, text: &str) -> String {
        self.reply_to(text, classify(text)).await
    }

    /// Like [`Assistant::reply`], for callers that already classified `text`.
    pub async fn reply_to(&self, text: &str, intent: Intent) -> String {
        let text = text.trim();

        match intent {
            Intent::Arithmetic(value) => {
                tracing::debug!(intent = "arithmetic", "dispatching message");
                format!("{RESULT_MARKER} {value}")
            }
            Intent::Price { coin } => {
                tracing::debug!(intent = "price", coin = %coin, "dispatching message");
                let price = self.price(&coin).await;
                format!("{PRICE_MARKER} {} Price: {price}", coin.to_uppercase())
            }
            Intent::Prompt => {
                tracing::debug!(intent = "prompt", "dispatching message");
                self.complete(text).await
            }
        }
    }

    /// `/ask <query>`: skip classification and go straight to the completion backend.
    pub async fn ask(&self, args: &str) -> String {
        let query = ask_query(args);
        if query.is_empty() {
            return ASK_USAGE.to_string();
        }
        self.complete(&query).await
    }

    async fn price(&self, coin: &str) -> String {
        match self.prices.usd_price(coin).await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(coin = %coin, error = %e, "price lookup failed");
                PRICE_ERROR.to_string()
            }
        }
    }

    async fn complete(&self, prompt: &str) -> String {
        match self.completions.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "completion failed");
                COMPLETION_ERROR.to_string()
            }
        }
    }
}
