//! Test helpers module
//!
//! This module provides utilities and helpers for testing FaqBuddy.
//! It includes a mock Telegram API, a PostgreSQL test database, Telegram
//! update builders and an in-memory conversation context.

#![allow(dead_code)]

pub mod database_helper;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
