use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use qbot_core::{config::Config, dispatch::Assistant};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    /// Our own `@username`, used to ignore commands addressed to other bots.
    pub bot_username: Option<String>,
}

/// Run the Telegram long-polling loop until the process is killed.
pub async fn run_polling(cfg: Arc<Config>, assistant: Arc<Assistant>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_token.clone());

    let bot_username = match bot.get_me().await {
        Ok(me) => {
            tracing::info!(username = %me.username(), "bot is running");
            Some(me.username().to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not fetch bot identity");
            None
        }
    };

    let state = Arc::new(AppState {
        assistant,
        bot_username,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
