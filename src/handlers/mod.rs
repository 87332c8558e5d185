//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for `/start`, `/help` and `/admin`
//! - Callback handlers for the confirmation buttons
//! - Message handlers for menu choices and free text
//!
//! Handlers only translate updates into dialogue events and render the
//! resulting responses. Group chats are ignored.

pub mod callbacks;
pub mod commands;
pub mod messages;
pub mod render;

pub use callbacks::handle_callback_query;
pub use commands::{handle_command, Command};
pub use messages::handle_message;

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::error;
use crate::dialogue::texts;
use crate::models::dialogue::Response;
use crate::utils::errors::{FaqBotError, Result};
use crate::utils::logging::log_store_failure;

/// Send a dialogue result; on failure tell the user and hand the error back
pub(crate) async fn deliver(bot: &Bot, chat_id: ChatId, result: Result<Response>) -> Result<()> {
    match result {
        Ok(response) => {
            render::send_response(bot, chat_id, &response).await?;
            Ok(())
        }
        Err(e) => {
            if let Some(store) = failed_store(&e) {
                log_store_failure(store, &e.to_string(), Some("dialogue"));
            }
            if let Err(send_error) = bot.send_message(chat_id, texts::INTERNAL_ERROR).await {
                error!(error = %send_error, "Failed to report error to user");
            }
            Err(e)
        }
    }
}

fn failed_store(error: &FaqBotError) -> Option<&'static str> {
    match error {
        FaqBotError::Database(_) => Some("content"),
        FaqBotError::Redis(_) | FaqBotError::Io(_) | FaqBotError::Storage(_) => Some("operators"),
        _ => None,
    }
}
