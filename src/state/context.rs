//! Conversation session
//!
//! A `Session` tracks the user's current step and the values collected by
//! the workflow in progress.

use std::collections::HashMap;
use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::errors::Result;
use super::scenarios::Step;

/// Session data key: selected category
pub const KEY_CATEGORY: &str = "category";
/// Session data key: question being added or answered
pub const KEY_QUESTION: &str = "question";
/// Session data key: question being renamed
pub const KEY_OLD_QUESTION: &str = "old_question";

/// Per-user conversation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub step: Step,
    /// Values written by the current workflow family
    pub data: HashMap<String, serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            step: Step::Root,
            data: HashMap::new(),
            updated_at: Utc::now(),
        }
    }

    /// Move to `step`; data is dropped when the workflow family changes
    pub fn set_step(&mut self, step: Step) {
        if step.scenario() != self.step.scenario() {
            self.data.clear();
        }
        self.step = step;
        self.touch();
    }

    /// Move to `step` with empty data
    pub fn reset_to(&mut self, step: Step) {
        self.data.clear();
        self.step = step;
        self.touch();
    }

    /// Back to the root with no data
    pub fn clear(&mut self) {
        self.reset_to(Step::Root);
    }

    pub fn set_data<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;
        self.data.insert(key.to_string(), json_value);
        self.touch();
        Ok(())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }

    /// Add or overwrite keys, preserving the others
    pub fn merge_data(&mut self, partial: HashMap<String, serde_json::Value>) {
        self.data.extend(partial);
        self.touch();
    }

    pub fn remove_data(&mut self, key: &str) -> Option<serde_json::Value> {
        self.touch();
        self.data.remove(key)
    }

    pub fn is_idle(&self) -> bool {
        self.step == Step::Root && self.data.is_empty()
    }

    /// Untouched for longer than `timeout`
    pub fn is_expired(&self, timeout: Duration) -> bool {
        Utc::now()
            .signed_duration_since(self.updated_at)
            .to_std()
            .map(|elapsed| elapsed > timeout)
            .unwrap_or(false)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
