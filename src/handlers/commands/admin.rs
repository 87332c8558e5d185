//! Admin command handler

use std::sync::Arc;
use teloxide::{Bot, types::Message};
use tracing::debug;
use crate::dialogue::ConversationMachine;
use crate::handlers::deliver;
use crate::utils::errors::Result;

/// Handle /admin command
///
/// Operators land on the admin panel; everyone else gets a denial and keeps
/// their current step.
pub async fn handle_admin_panel(
    bot: Bot,
    msg: Message,
    user_id: i64,
    machine: Arc<ConversationMachine>,
) -> Result<()> {
    debug!(user_id = user_id, "Processing /admin command");
    deliver(&bot, msg.chat.id, machine.enter_admin(user_id).await).await
}
