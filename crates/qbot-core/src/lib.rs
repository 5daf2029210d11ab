//! Core logic for qbot.
//!
//! This crate is framework-agnostic. Telegram, CoinGecko, OpenRouter and the
//! liveness server live in adapter crates; they talk to this crate through the
//! ports in [`ports`].

pub mod calc;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod ports;

pub use errors::{Error, Result};
