//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod faq;
pub mod dialogue;

// Re-export commonly used models
pub use faq::{Category, CategorySummary};
pub use dialogue::{TextEvent, ConfirmEvent, ConfirmChoice, Response, Menu, CONFIRM_YES, CONFIRM_NO};
