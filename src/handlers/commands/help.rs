//! Help command handler

use std::sync::Arc;
use teloxide::{Bot, types::Message};
use crate::dialogue::ConversationMachine;
use crate::handlers::deliver;
use crate::utils::errors::Result;

/// Handle /help command; the current step and its menu are kept
pub async fn handle_help(bot: Bot, msg: Message, user_id: i64, machine: Arc<ConversationMachine>) -> Result<()> {
    deliver(&bot, msg.chat.id, machine.help(user_id).await).await
}
