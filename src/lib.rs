//! FaqBuddy Telegram Bot
//!
//! A menu-driven FAQ bot. Visitors browse categories and read answers;
//! operators maintain the content and the operator list through an admin
//! panel built from the same reply-keyboard menus.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod dialogue;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{FaqBotError, Result};

// Re-export main components for easy access
pub use dialogue::ConversationMachine;
pub use services::ServiceFactory;
pub use state::{SessionStore, SessionStoreManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
