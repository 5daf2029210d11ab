use std::sync::Arc;

use anyhow::Context;

use qbot_coingecko::CoinGeckoClient;
use qbot_core::{config::Config, dispatch::Assistant};
use qbot_openrouter::OpenRouterClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    qbot_core::logging::init("qbot")?;

    let cfg = Arc::new(Config::load()?);

    let prices = Arc::new(CoinGeckoClient::new(
        cfg.coingecko_base_url.clone(),
        cfg.http_timeout,
    )?);
    let completions = Arc::new(OpenRouterClient::new(
        cfg.openrouter_api_key.clone(),
        cfg.openrouter_model.clone(),
        cfg.openrouter_base_url.clone(),
        cfg.http_timeout,
    )?);
    tracing::info!(model = %completions.model(), "completion backend configured");

    let assistant = Arc::new(Assistant::new(prices, completions));

    // Two independent loops; neither shares mutable state with the other.
    let liveness = tokio::spawn(qbot_liveness::serve(cfg.liveness_addr));
    let telegram = tokio::spawn(qbot_telegram::router::run_polling(cfg.clone(), assistant));

    tokio::select! {
        res = liveness => {
            res.context("liveness task panicked")?
                .context("liveness server stopped")?;
            anyhow::bail!("liveness server exited")
        }
        res = telegram => {
            res.context("telegram task panicked")?
                .context("telegram loop stopped")?;
            anyhow::bail!("telegram loop exited")
        }
    }
}
