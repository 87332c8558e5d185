//! FAQ content store
//!
//! The `ContentStore` trait is the CRUD contract the dialogue consumes.
//! Every expected failure (duplicate name, missing category, ...) is returned
//! as a result tag; `Err` is reserved for infrastructure failures. Backends:
//! `MemoryContentStore` here and the PostgreSQL `FaqRepository`.

use std::collections::{BTreeMap, BTreeSet};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use crate::models::faq::{Category, CategorySummary};
use crate::utils::errors::Result;

/// Outcome of a category mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CategoryChange {
    Applied,
    /// `add_category`: a category with this exact name exists
    AlreadyExists,
    /// `rename_category`: the new name is already used
    TargetNameTaken,
    NotFound,
}

/// Outcome of a question/answer mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EntryChange {
    Applied,
    CategoryNotFound,
    QuestionNotFound,
    QuestionExists,
}

impl CategoryChange {
    pub fn is_applied(self) -> bool {
        self == CategoryChange::Applied
    }
}

impl EntryChange {
    pub fn is_applied(self) -> bool {
        self == EntryChange::Applied
    }
}

/// CRUD contract over categories and their question/answer pairs
///
/// Mutations on the same category are serialized by the implementation.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn list_categories(&self) -> Result<BTreeSet<String>>;

    async fn category_exists(&self, name: &str) -> Result<bool>;

    async fn add_category(&self, name: &str) -> Result<CategoryChange>;

    /// Exact-match lookup; `NotFound` is checked before the target, so
    /// renaming a category to its own name yields `TargetNameTaken`.
    async fn rename_category(&self, old: &str, new: &str) -> Result<CategoryChange>;

    /// Deletes the category together with all of its questions
    async fn delete_category(&self, name: &str) -> Result<CategoryChange>;

    /// Empty when the category is absent
    async fn list_questions(&self, category: &str) -> Result<BTreeMap<String, String>>;

    async fn add_question(&self, category: &str, question: &str, answer: &str) -> Result<EntryChange>;

    async fn edit_answer(&self, category: &str, question: &str, answer: &str) -> Result<EntryChange>;

    async fn delete_question(&self, category: &str, question: &str) -> Result<EntryChange>;

    /// Moves the answer from `old` to `new` in a single mutation
    async fn rename_question(&self, category: &str, old: &str, new: &str) -> Result<EntryChange>;

    /// Categories with their question counts, sorted by name
    async fn overview(&self) -> Result<Vec<CategorySummary>> {
        let mut summaries = Vec::new();
        for name in self.list_categories().await? {
            let question_count = self.list_questions(&name).await?.len() as i64;
            summaries.push(CategorySummary { name, question_count });
        }
        Ok(summaries)
    }
}

/// In-process content store
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    categories: RwLock<BTreeMap<String, BTreeMap<String, String>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with the given categories
    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let map = categories
            .into_iter()
            .map(|c| (c.name, c.questions))
            .collect();
        Self {
            categories: RwLock::new(map),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list_categories(&self) -> Result<BTreeSet<String>> {
        Ok(self.categories.read().await.keys().cloned().collect())
    }

    async fn category_exists(&self, name: &str) -> Result<bool> {
        Ok(self.categories.read().await.contains_key(name))
    }

    async fn add_category(&self, name: &str) -> Result<CategoryChange> {
        let mut categories = self.categories.write().await;
        if categories.contains_key(name) {
            return Ok(CategoryChange::AlreadyExists);
        }
        categories.insert(name.to_string(), BTreeMap::new());
        debug!(category = name, "Category added");
        Ok(CategoryChange::Applied)
    }

    async fn rename_category(&self, old: &str, new: &str) -> Result<CategoryChange> {
        let mut categories = self.categories.write().await;
        if !categories.contains_key(old) {
            return Ok(CategoryChange::NotFound);
        }
        if categories.contains_key(new) {
            return Ok(CategoryChange::TargetNameTaken);
        }
        if let Some(questions) = categories.remove(old) {
            categories.insert(new.to_string(), questions);
        }
        debug!(old = old, new = new, "Category renamed");
        Ok(CategoryChange::Applied)
    }

    async fn delete_category(&self, name: &str) -> Result<CategoryChange> {
        let mut categories = self.categories.write().await;
        match categories.remove(name) {
            Some(_) => Ok(CategoryChange::Applied),
            None => Ok(CategoryChange::NotFound),
        }
    }

    async fn list_questions(&self, category: &str) -> Result<BTreeMap<String, String>> {
        Ok(self
            .categories
            .read()
            .await
            .get(category)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_question(&self, category: &str, question: &str, answer: &str) -> Result<EntryChange> {
        let mut categories = self.categories.write().await;
        let Some(questions) = categories.get_mut(category) else {
            return Ok(EntryChange::CategoryNotFound);
        };
        if questions.contains_key(question) {
            return Ok(EntryChange::QuestionExists);
        }
        questions.insert(question.to_string(), answer.to_string());
        Ok(EntryChange::Applied)
    }

    async fn edit_answer(&self, category: &str, question: &str, answer: &str) -> Result<EntryChange> {
        let mut categories = self.categories.write().await;
        let Some(questions) = categories.get_mut(category) else {
            return Ok(EntryChange::CategoryNotFound);
        };
        match questions.get_mut(question) {
            Some(existing) => {
                *existing = answer.to_string();
                Ok(EntryChange::Applied)
            }
            None => Ok(EntryChange::QuestionNotFound),
        }
    }

    async fn delete_question(&self, category: &str, question: &str) -> Result<EntryChange> {
        let mut categories = self.categories.write().await;
        let Some(questions) = categories.get_mut(category) else {
            return Ok(EntryChange::CategoryNotFound);
        };
        match questions.remove(question) {
            Some(_) => Ok(EntryChange::Applied),
            None => Ok(EntryChange::QuestionNotFound),
        }
    }

    async fn rename_question(&self, category: &str, old: &str, new: &str) -> Result<EntryChange> {
        let mut categories = self.categories.write().await;
        let Some(questions) = categories.get_mut(category) else {
            return Ok(EntryChange::CategoryNotFound);
        };
        if !questions.contains_key(old) {
            return Ok(EntryChange::QuestionNotFound);
        }
        if questions.contains_key(new) {
            return Ok(EntryChange::QuestionExists);
        }
        if let Some(answer) = questions.remove(old) {
            questions.insert(new.to_string(), answer);
        }
        Ok(EntryChange::Applied)
    }
}
