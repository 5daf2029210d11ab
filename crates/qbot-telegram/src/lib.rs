//! Telegram adapter (teloxide).
//!
//! Receives text messages and commands over long polling and answers each one
//! with the reply produced by `qbot-core`.

pub mod handlers;
pub mod router;

/// Hard limit Telegram puts on a single text message.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;
