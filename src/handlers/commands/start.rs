//! Start command handler
//!
//! `/start` always works: it abandons whatever the user was doing and shows
//! the category menu.

use std::sync::Arc;
use teloxide::{Bot, types::Message};
use tracing::debug;
use crate::dialogue::ConversationMachine;
use crate::handlers::deliver;
use crate::utils::errors::Result;

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, user_id: i64, machine: Arc<ConversationMachine>) -> Result<()> {
    debug!(user_id = user_id, "Processing /start command");
    deliver(&bot, msg.chat.id, machine.start(user_id).await).await
}
