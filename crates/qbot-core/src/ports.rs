use async_trait::async_trait;

/// Why a price lookup did not produce a price.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price request failed: {0}")]
    Transport(String),

    #[error("price api returned status {0}")]
    Status(u16),

    #[error("price response was not valid json: {0}")]
    Decode(String),

    #[error("no usd price for coin '{0}'")]
    UnknownCoin(String),
}

/// Why a completion request did not produce text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("completion api returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion response was not valid json: {0}")]
    Decode(String),

    #[error("completion response had no choices[0].message.content")]
    MissingContent,
}

/// Port for the cryptocurrency price backend (CoinGecko today).
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Look up the USD price of `coin_id`, already formatted as `"$<value>"`.
    async fn usd_price(&self, coin_id: &str) -> Result<String, PriceError>;
}

/// Port for the remote language-model completion backend.
///
/// Every call is a single-turn, stateless conversation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
