use std::sync::Arc;

use teloxide::{prelude::*, types::ChatAction};

use qbot_core::dispatch::{classify, Intent};

use crate::router::AppState;

use super::send_reply;

pub async fn handle_text(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    let intent = classify(text);

    // Only network-bound intents are slow enough to deserve a typing indicator.
    if !matches!(intent, Intent::Arithmetic(_)) {
        let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;
    }

    let reply = state.assistant.reply_to(text, intent).await;
    send_reply(&bot, chat_id, &reply).await;

    Ok(())
}
