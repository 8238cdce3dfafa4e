// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Courier relay.
//!
//! Connects to Telegram via teloxide long polling, translates commands,
//! text messages, and menu callbacks into relay events, and renders the
//! relay's replies back into Bot API calls with MarkdownV2 formatting.

pub mod handler;
pub mod markdown;

use std::sync::Arc;

use async_trait::async_trait;
use courier_config::model::TelegramConfig;
use courier_core::{AdapterType, CourierError, HealthStatus, RelayAdapter};
use courier_relay::{Relay, RelayEvent, RelayReply};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId, MessageId, ParseMode, Recipient};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, warn};

/// Sent when an exchange fails for a reason the user cannot act on.
const GENERIC_ERROR_TEXT: &str = "Something went wrong handling that message. Please try again.";

/// Bot commands recognized by the relay.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Courier commands:")]
pub enum RelayCommand {
    #[command(description = "greet the bot")]
    Start,
    #[command(description = "clear your conversation history")]
    Clear,
    #[command(description = "choose the model used for replies")]
    Models,
}

/// Telegram channel adapter.
///
/// Owns the bot handle and the relay; [`TelegramChannel::run`] blocks on the
/// dispatcher until ctrl-c.
pub struct TelegramChannel {
    bot: Bot,
    relay: Arc<Relay>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Token resolution order: `config.bot_token` -> `TELEGRAM_BOT_TOKEN`
    /// environment variable -> error.
    pub fn new(config: &TelegramConfig, relay: Arc<Relay>) -> Result<Self, CourierError> {
        let token = resolve_bot_token(&config.bot_token)?;
        Ok(Self {
            bot: Bot::new(token),
            relay,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Runs the dispatcher until ctrl-c.
    ///
    /// Every update is handled independently; a failing exchange is logged
    /// and answered with an error notice, never allowed to stop dispatch.
    pub async fn run(&self) {
        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<RelayCommand>()
                    .endpoint(handle_command),
            )
            .branch(Update::filter_message().endpoint(handle_message))
            .branch(Update::filter_callback_query().endpoint(handle_callback));

        info!("starting Telegram long polling");

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![self.relay.clone()])
            .default_handler(|_| async {}) // Silently ignore other update kinds
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

/// Resolves the bot token from config or the `TELEGRAM_BOT_TOKEN` env var.
fn resolve_bot_token(configured: &Option<String>) -> Result<String, CourierError> {
    if let Some(token) = configured {
        if token.is_empty() {
            return Err(CourierError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }
        return Ok(token.clone());
    }

    match std::env::var("TELEGRAM_BOT_TOKEN") {
        Ok(token) if !token.is_empty() => Ok(token),
        _ => Err(CourierError::Config(
            "Telegram bot token required: set telegram.bot_token or TELEGRAM_BOT_TOKEN".into(),
        )),
    }
}

#[async_trait]
impl RelayAdapter for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, CourierError> {
        // Check if the bot token is valid by calling getMe.
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), CourierError> {
        debug!("Telegram channel shutting down");
        Ok(())
    }
}

/// Handles `/start`, `/clear`, and `/models`.
async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: RelayCommand,
    relay: Arc<Relay>,
) -> ResponseResult<()> {
    let Some(user) = handler::sender(&msg) else {
        debug!(chat_id = msg.chat.id.0, "ignoring command without sender");
        return Ok(());
    };

    let event = match cmd {
        RelayCommand::Start => RelayEvent::Start { user },
        RelayCommand::Clear => RelayEvent::ClearHistory { user },
        RelayCommand::Models => RelayEvent::ListModels { user },
    };

    let outcome = match relay.handle(event).await {
        Ok(reply) => deliver(&bot, msg.chat.id, reply).await,
        Err(e) => {
            error!(error = %e, "command handling failed");
            send_plain(&bot, msg.chat.id, GENERIC_ERROR_TEXT).await
        }
    };
    if let Err(e) = outcome {
        error!(error = %e, "failed to deliver reply");
    }
    Ok(())
}

/// Handles plain text messages. Non-text messages and unrecognized commands
/// are ignored.
async fn handle_message(bot: Bot, msg: Message, relay: Arc<Relay>) -> ResponseResult<()> {
    let Some(event) = handler::text_event(&msg) else {
        debug!(msg_id = msg.id.0, "ignoring non-text or unrecognized command");
        return Ok(());
    };

    let outcome = match relay.handle(event).await {
        Ok(reply) => deliver(&bot, msg.chat.id, reply).await,
        Err(e) => {
            error!(error = %e, "message handling failed");
            send_plain(&bot, msg.chat.id, GENERIC_ERROR_TEXT).await
        }
    };
    if let Err(e) = outcome {
        error!(error = %e, "failed to deliver reply");
    }
    Ok(())
}

/// Handles model-menu button presses.
async fn handle_callback(bot: Bot, query: CallbackQuery, relay: Arc<Relay>) -> ResponseResult<()> {
    if let Some(event) = handler::callback_event(&query) {
        let outcome = match relay.handle(event).await {
            Ok(RelayReply::MenuEdit(text)) => match query.message.as_ref() {
                Some(message) => edit_text(&bot, message.chat().id, message.id(), &text).await,
                None => Ok(()),
            },
            Ok(RelayReply::Text(text)) => match query.message.as_ref() {
                // Access denial arrives as plain text.
                Some(message) => send_text(&bot, message.chat().id, &text).await,
                None => Ok(()),
            },
            Ok(reply) => {
                debug!(?reply, "unexpected reply for callback");
                Ok(())
            }
            Err(e) => {
                // A selector outside the registry can only come from a
                // stale or forged callback; log and acknowledge.
                error!(error = %e, "callback handling failed");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            error!(error = %e, "failed to deliver callback reply");
        }
    }

    bot.answer_callback_query(query.id.clone()).await?;
    Ok(())
}

/// Renders a relay reply into Bot API calls.
async fn deliver(bot: &Bot, chat_id: ChatId, reply: RelayReply) -> Result<(), CourierError> {
    match reply {
        RelayReply::Text(text) => send_text(bot, chat_id, &text).await,
        RelayReply::Menu { heading, options } => {
            let markup = handler::model_menu(&options);
            bot.send_message(Recipient::Id(chat_id), heading)
                .reply_markup(markup)
                .await
                .map_err(|e| CourierError::Channel {
                    message: format!("failed to send model menu: {e}"),
                    source: Some(Box::new(e)),
                })?;
            Ok(())
        }
        // Menu edits are performed in the callback arm, which knows the
        // message to edit; anywhere else they degrade to a plain send.
        RelayReply::MenuEdit(text) => send_text(bot, chat_id, &text).await,
    }
}

/// Sends text as MarkdownV2, falling back to plain text when Telegram
/// rejects the formatting.
async fn send_text(bot: &Bot, chat_id: ChatId, text: &str) -> Result<(), CourierError> {
    let escaped = markdown::escape_markdown_v2(text);
    match bot
        .send_message(Recipient::Id(chat_id), &escaped)
        .parse_mode(ParseMode::MarkdownV2)
        .await
    {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(error = %e, "MarkdownV2 send failed, retrying as plain text");
            send_plain(bot, chat_id, text).await
        }
    }
}

/// Sends text without a parse mode.
async fn send_plain(bot: &Bot, chat_id: ChatId, text: &str) -> Result<(), CourierError> {
    bot.send_message(Recipient::Id(chat_id), text)
        .await
        .map_err(|e| CourierError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(())
}

/// Edits a previously sent message, falling back to plain text when the
/// formatting is rejected. An unchanged-message error is not a failure.
async fn edit_text(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    text: &str,
) -> Result<(), CourierError> {
    let escaped = markdown::escape_markdown_v2(text);
    match bot
        .edit_message_text(chat_id, message_id, &escaped)
        .parse_mode(ParseMode::MarkdownV2)
        .await
    {
        Ok(_) => Ok(()),
        Err(e) => {
            let description = e.to_string();
            if description.contains("message is not modified") {
                return Ok(());
            }
            warn!(error = %e, "MarkdownV2 edit failed, retrying as plain text");
            bot.edit_message_text(chat_id, message_id, text)
                .await
                .map_err(|e| CourierError::Channel {
                    message: format!("failed to edit message: {e}"),
                    source: Some(Box::new(e)),
                })?;
            Ok(())
        }
    }
}
