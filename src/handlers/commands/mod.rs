//! Command handlers module
//!
//! This module contains handlers for the bot commands: /start, /help and /admin.

pub mod admin;
pub mod help;
pub mod start;

use std::sync::Arc;
use teloxide::{Bot, types::Message, utils::command::BotCommands};
use tracing::{debug, Instrument};
use crate::dialogue::ConversationMachine;
use crate::utils::errors::Result;
use crate::utils::helpers::generate_correlation_id;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "FaqBuddy commands:")]
pub enum Command {
    #[command(description = "Show the FAQ categories")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Admin panel (operators only)")]
    Admin,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    machine: Arc<ConversationMachine>,
) -> Result<()> {
    if !msg.chat.id.is_user() {
        debug!(chat_id = ?msg.chat.id, "Ignoring command outside private chat");
        return Ok(());
    }

    let Some(user_id) = msg.from.as_ref().map(|user| user.id.0 as i64) else {
        return Ok(());
    };

    let span = tracing::info_span!(
        "command",
        user_id = user_id,
        command = ?cmd,
        correlation_id = %generate_correlation_id()
    );

    async move {
        match cmd {
            Command::Start => start::handle_start(bot, msg, user_id, machine).await,
            Command::Help => help::handle_help(bot, msg, user_id, machine).await,
            Command::Admin => admin::handle_admin_panel(bot, msg, user_id, machine).await,
        }
    }
    .instrument(span)
    .await
}
