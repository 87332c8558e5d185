//! Rendering of dialogue responses as Telegram messages

use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode,
    ReplyMarkup,
};
use crate::models::dialogue::{ConfirmChoice, Menu, Response};
use crate::utils::errors::Result;

/// Reply markup for a menu: one button per row
pub fn reply_markup(menu: &Menu) -> ReplyMarkup {
    match menu {
        Menu::Keyboard(labels) => {
            let rows = labels.iter().map(|label| vec![KeyboardButton::new(label.clone())]);
            ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
        }
        Menu::Confirm(token) => ReplyMarkup::InlineKeyboard(confirm_keyboard(token)),
        Menu::Remove => ReplyMarkup::KeyboardRemove(KeyboardRemove::new()),
    }
}

/// Inline yes/no buttons of the pending deletion identified by `token`
pub fn confirm_keyboard(token: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Yes", ConfirmChoice::Yes.callback_data(token)),
        InlineKeyboardButton::callback("❌ No", ConfirmChoice::No.callback_data(token)),
    ]])
}

pub async fn send_response(bot: &Bot, chat_id: ChatId, response: &Response) -> Result<Message> {
    let mut request = bot
        .send_message(chat_id, response.text.clone())
        .reply_markup(reply_markup(&response.menu));

    if response.rich_text {
        request = request.parse_mode(ParseMode::Html);
    }

    Ok(request.await?)
}
