//! FAQ content models

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A category record: its name and the question → answer map it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub questions: BTreeMap<String, String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            questions: BTreeMap::new(),
        }
    }
}

/// Category name with its number of questions, for the admin overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CategorySummary {
    pub name: String,
    pub question_count: i64,
}
