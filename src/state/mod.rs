//! State management module
//!
//! This module handles conversation sessions and the step graph

pub mod context;
pub mod scenarios;
pub mod storage;

// Re-export commonly used state components
pub use context::{Session, KEY_CATEGORY, KEY_QUESTION, KEY_OLD_QUESTION};
pub use scenarios::{Step, Scenario, MenuChoice, PendingDeletion, DeletionTarget};
pub use storage::{SessionStore, SessionStoreManager};
