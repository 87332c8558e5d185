//! Test data helpers for creating Telegram updates
//!
//! Updates are built from Bot API JSON so they match what the dispatcher
//! receives in production.

use serde_json::{json, Value};
use teloxide::types::{CallbackQuery, Message};

fn user_json(user_id: i64) -> Value {
    json!({
        "id": user_id,
        "is_bot": false,
        "first_name": "TestUser",
        "username": "testuser",
        "language_code": "en"
    })
}

fn message_json(user_id: i64, chat: Value, text: &str) -> Value {
    json!({
        "message_id": 1,
        "date": 1640995200,
        "chat": chat,
        "from": user_json(user_id),
        "text": text
    })
}

/// Text message in the private chat with `user_id`
pub fn create_private_message(user_id: i64, text: &str) -> Message {
    let chat = json!({ "id": user_id, "type": "private", "first_name": "TestUser" });
    serde_json::from_value(message_json(user_id, chat, text)).expect("valid private message")
}

/// Text message sent by `user_id` in a supergroup
pub fn create_group_message(user_id: i64, chat_id: i64, text: &str) -> Message {
    let chat = json!({ "id": chat_id, "type": "supergroup", "title": "Test Group" });
    serde_json::from_value(message_json(user_id, chat, text)).expect("valid group message")
}

/// Callback query pressed on a bot message in the private chat
pub fn create_callback_query(user_id: i64, data: &str) -> CallbackQuery {
    let chat = json!({ "id": user_id, "type": "private", "first_name": "TestUser" });
    let mut message = message_json(user_id, chat, "Delete the category?");
    message["from"] = json!({ "id": 12345, "is_bot": true, "first_name": "TestBot", "username": "test_bot" });

    serde_json::from_value(json!({
        "id": format!("callback_{}", user_id),
        "from": user_json(user_id),
        "message": message,
        "chat_instance": "test_chat_instance",
        "data": data
    }))
    .expect("valid callback query")
}
