//! Message handlers module
//!
//! Every private text message is a dialogue event: a menu choice or free
//! text entered at an input step.

use std::sync::Arc;
use teloxide::{Bot, types::Message};
use tracing::{debug, Instrument};
use crate::dialogue::ConversationMachine;
use crate::handlers::deliver;
use crate::models::dialogue::TextEvent;
use crate::utils::errors::Result;
use crate::utils::helpers::{generate_correlation_id, truncate_text};

/// Handle incoming text messages
pub async fn handle_message(bot: Bot, msg: Message, machine: Arc<ConversationMachine>) -> Result<()> {
    let chat_id = msg.chat.id;
    if !chat_id.is_user() {
        debug!(chat_id = ?chat_id, "Ignoring message outside private chat");
        return Ok(());
    }

    let Some(user_id) = msg.from.as_ref().map(|user| user.id.0 as i64) else {
        return Ok(());
    };

    let Some(text) = msg.text() else {
        debug!(user_id = user_id, "Ignoring non-text message");
        return Ok(());
    };

    let span = tracing::info_span!(
        "message",
        user_id = user_id,
        correlation_id = %generate_correlation_id()
    );

    async move {
        debug!(text = %truncate_text(text, 64), "Processing message");
        let result = machine.handle_text(TextEvent::new(user_id, text)).await;
        deliver(&bot, chat_id, result).await
    }
    .instrument(span)
    .await
}
