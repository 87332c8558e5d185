//! Callback query handlers module
//!
//! The only inline buttons the bot sends are the yes/no buttons of a pending
//! deletion, tagged with that deletion's token.

use std::sync::Arc;
use teloxide::{Bot, types::{CallbackQuery, ChatId}, prelude::*};
use tracing::{debug, warn, Instrument};
use crate::dialogue::ConversationMachine;
use crate::handlers::deliver;
use crate::models::dialogue::ConfirmEvent;
use crate::utils::errors::Result;
use crate::utils::helpers::generate_correlation_id;

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, machine: Arc<ConversationMachine>) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    if !chat_id.is_user() {
        debug!(chat_id = ?chat_id, "Ignoring callback outside private chat");
        return Ok(());
    }

    let span = tracing::info_span!(
        "callback",
        user_id = user_id,
        correlation_id = %generate_correlation_id()
    );

    async move {
        // Answer the callback query first to remove loading state
        if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
            warn!(error = %e, "Failed to answer callback query");
        }

        let event = query
            .data
            .as_deref()
            .and_then(|data| ConfirmEvent::from_callback_data(user_id, data));
        debug!(callback_data = ?query.data, choice = ?event.as_ref().map(|e| e.choice), "Processing callback query");

        let result = match event {
            Some(event) => {
                // The buttons are single-use
                if let Some(message) = &query.message {
                    if let Err(e) = bot.edit_message_reply_markup(chat_id, message.id()).await {
                        warn!(error = %e, "Failed to remove confirmation buttons");
                    }
                }
                machine.handle_confirm(event).await
            }
            None => machine.unsupported(user_id).await,
        };

        deliver(&bot, chat_id, result).await
    }
    .instrument(span)
    .await
}
