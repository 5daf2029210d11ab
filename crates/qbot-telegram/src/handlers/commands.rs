use std::sync::Arc;

use teloxide::{prelude::*, types::ChatAction};

use crate::router::AppState;

use super::send_reply;

const HELP_TEXT: &str = "🤖 Hi! Send me a message and I'll figure out what to do with it:\n\n\
📐 Math: 2+2, sqrt(16) * 3\n\
💰 Prices: price bitcoin\n\
💬 Anything else is answered by the AI\n\n\
Commands:\n\
/ask <question> - Ask the AI directly\n\
/help - Show this message";

#[derive(Clone, Debug, PartialEq, Eq)]
struct ParsedCommand {
    name: String,
    /// `botname` from `/cmd@botname`.
    target: Option<String>,
    args: String,
}

fn parse_command(text: &str) -> ParsedCommand {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let args = parts.next().unwrap_or("").trim().to_string();

    let mut head = first.trim_start_matches('/').splitn(2, '@');
    let name = head.next().unwrap_or("").to_lowercase();
    let target = head
        .next()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    ParsedCommand { name, target, args }
}

/// True when the command names a bot and it is not us.
fn addressed_elsewhere(target: Option<&str>, me: Option<&str>) -> bool {
    match (target, me) {
        (Some(target), Some(me)) => !target.eq_ignore_ascii_case(me),
        _ => false,
    }
}

pub async fn handle_command(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    let ParsedCommand {
        name: cmd,
        target,
        args: arg,
    } = parse_command(text);

    if addressed_elsewhere(target.as_deref(), state.bot_username.as_deref()) {
        tracing::debug!(chat_id = chat_id.0, command = %cmd, "ignoring command for another bot");
        return Ok(());
    }

    match cmd.as_str() {
        "ask" => {
            tracing::debug!(chat_id = chat_id.0, "ask command");
            if !arg.is_empty() {
                let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;
            }
            let reply = state.assistant.ask(&arg).await;
            send_reply(&bot, chat_id, &reply).await;
            Ok(())
        }

        "start" | "help" => {
            send_reply(&bot, chat_id, HELP_TEXT).await;
            Ok(())
        }

        _ => {
            send_reply(&bot, chat_id, &format!("Unknown command: /{cmd}")).await;
            Ok(())
        }
    }
}
