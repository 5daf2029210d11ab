//! Telegram update handlers.
//!
//! Commands (`/ask`, `/help`, ...) go to [`commands`]; every other text
//! message goes through intent dispatch in [`text`]. Non-text updates are
//! ignored.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{ChatId, Message},
};

use crate::router::AppState;
use crate::TELEGRAM_MESSAGE_LIMIT;

mod commands;
mod text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Command,
    Text,
    Ignore,
}

fn route(text: Option<&str>) -> Route {
    match text {
        Some(t) if t.starts_with('/') => Route::Command,
        Some(_) => Route::Text,
        None => Route::Ignore,
    }
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    match route(msg.text()) {
        Route::Command => commands::handle_command(bot, msg, state).await,
        Route::Text => text::handle_text(bot, msg, state).await,
        Route::Ignore => Ok(()),
    }
}

/// Send `reply` to `chat_id`, split into as many messages as Telegram requires.
///
/// Delivery failures are logged, not propagated: the dispatcher should keep
/// polling regardless.
pub(crate) async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &str) {
    for chunk in split_text_chunks(reply, TELEGRAM_MESSAGE_LIMIT) {
        if let Err(e) = bot.send_message(chat_id, chunk).await {
            tracing::warn!(chat_id = chat_id.0, error = %e, "failed to send reply");
            return;
        }
    }
}

/// Split `text` into chunks of at most `limit` chars, preferring line breaks.
fn split_text_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    if text.chars().count() <= limit {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        if rest.chars().count() <= limit {
            out.push(rest.to_string());
            break;
        }

        // Byte index just past the `limit`-th char.
        let hard_end = rest
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let end = match rest[..hard_end].rfind('\n') {
            Some(nl) if nl > 0 => nl + 1,
            _ => hard_end,
        };

        out.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    out
}
