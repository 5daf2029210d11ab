//! Liveness endpoint for external uptime monitors.
//!
//! `GET /` always answers `200 Bot is alive!`. The route holds no state and
//! knows nothing about the Telegram loop.

use std::net::SocketAddr;

use axum::{routing::get, Router};

use qbot_core::{errors::Error, Result};

pub const ALIVE_BODY: &str = "Bot is alive!";

async fn alive() -> &'static str {
    ALIVE_BODY
}

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

/// Bind `addr` and serve the liveness route until the process dies.
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "liveness endpoint listening");

    axum::serve(listener, router())
        .await
        .map_err(|e| Error::External(format!("liveness server failed: {e}")))
}
