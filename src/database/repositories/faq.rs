//! FAQ repository implementation
//!
//! One row per category in `faq_categories`; the question → answer map is a
//! JSONB column. Question mutations lock the category row for the duration
//! of the transaction.

use std::collections::{BTreeMap, BTreeSet};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use crate::models::faq::CategorySummary;
use crate::services::content::{CategoryChange, ContentStore, EntryChange};
use crate::utils::errors::{FaqBotError, Result};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
#[derive(Debug)]
pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply `change` to the question map of `category` under a row lock.
    /// The map is written back only when `change` reports `Applied`.
    async fn mutate_questions<F>(&self, category: &str, change: F) -> Result<EntryChange>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> EntryChange + Send,
    {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_scalar::<_, Json<BTreeMap<String, String>>>(
            "SELECT questions FROM faq_categories WHERE name = $1 FOR UPDATE"
        )
        .bind(category)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(Json(mut questions)) = current else {
            return Ok(EntryChange::CategoryNotFound);
        };

        let outcome = change(&mut questions);
        if outcome.is_applied() {
            sqlx::query("UPDATE faq_categories SET questions = $2, updated_at = NOW() WHERE name = $1")
                .bind(category)
                .bind(Json(questions))
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            debug!(category = category, "Question map updated");
        }

        Ok(outcome)
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl ContentStore for FaqRepository {
    async fn list_categories(&self) -> Result<BTreeSet<String>> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM faq_categories")
            .fetch_all(&self.pool)
            .await?;

        Ok(names.into_iter().collect())
    }

    async fn category_exists(&self, name: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM faq_categories WHERE name = $1)"
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn add_category(&self, name: &str) -> Result<CategoryChange> {
        let result = sqlx::query(
            "INSERT INTO faq_categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING"
        )
        .bind(name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(CategoryChange::AlreadyExists);
        }
        debug!(category = name, "Category added");
        Ok(CategoryChange::Applied)
    }

    async fn rename_category(&self, old: &str, new: &str) -> Result<CategoryChange> {
        let mut tx = self.pool.begin().await?;

        let found = sqlx::query_scalar::<_, String>(
            "SELECT name FROM faq_categories WHERE name = $1 FOR UPDATE"
        )
        .bind(old)
        .fetch_optional(&mut *tx)
        .await?;

        if found.is_none() {
            return Ok(CategoryChange::NotFound);
        }
        if old == new {
            return Ok(CategoryChange::TargetNameTaken);
        }

        let updated = sqlx::query("UPDATE faq_categories SET name = $2, updated_at = NOW() WHERE name = $1")
            .bind(old)
            .bind(new)
            .execute(&mut *tx)
            .await;

        match updated {
            Ok(_) => {
                tx.commit().await?;
                debug!(old = old, new = new, "Category renamed");
                Ok(CategoryChange::Applied)
            }
            Err(e) if is_unique_violation(&e) => Ok(CategoryChange::TargetNameTaken),
            Err(e) => Err(FaqBotError::Database(e)),
        }
    }

    async fn delete_category(&self, name: &str) -> Result<CategoryChange> {
        let result = sqlx::query("DELETE FROM faq_categories WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(CategoryChange::NotFound);
        }
        Ok(CategoryChange::Applied)
    }

    async fn list_questions(&self, category: &str) -> Result<BTreeMap<String, String>> {
        let questions = sqlx::query_scalar::<_, Json<BTreeMap<String, String>>>(
            "SELECT questions FROM faq_categories WHERE name = $1"
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;

        Ok(questions.map(|q| q.0).unwrap_or_default())
    }

    async fn add_question(&self, category: &str, question: &str, answer: &str) -> Result<EntryChange> {
        self.mutate_questions(category, |questions| {
            if questions.contains_key(question) {
                return EntryChange::QuestionExists;
            }
            questions.insert(question.to_string(), answer.to_string());
            EntryChange::Applied
        })
        .await
    }

    async fn edit_answer(&self, category: &str, question: &str, answer: &str) -> Result<EntryChange> {
        self.mutate_questions(category, |questions| match questions.get_mut(question) {
            Some(existing) => {
                *existing = answer.to_string();
                EntryChange::Applied
            }
            None => EntryChange::QuestionNotFound,
        })
        .await
    }

    async fn delete_question(&self, category: &str, question: &str) -> Result<EntryChange> {
        self.mutate_questions(category, |questions| match questions.remove(question) {
            Some(_) => EntryChange::Applied,
            None => EntryChange::QuestionNotFound,
        })
        .await
    }

    async fn rename_question(&self, category: &str, old: &str, new: &str) -> Result<EntryChange> {
        self.mutate_questions(category, |questions| {
            if !questions.contains_key(old) {
                return EntryChange::QuestionNotFound;
            }
            if questions.contains_key(new) {
                return EntryChange::QuestionExists;
            }
            match questions.remove(old) {
                Some(answer) => {
                    questions.insert(new.to_string(), answer);
                    EntryChange::Applied
                }
                None => EntryChange::QuestionNotFound,
            }
        })
        .await
    }

    async fn overview(&self) -> Result<Vec<CategorySummary>> {
        let summaries = sqlx::query_as::<_, CategorySummary>(
            r#"
            SELECT name, (SELECT COUNT(*) FROM jsonb_object_keys(questions))::BIGINT AS question_count
            FROM faq_categories
            ORDER BY name COLLATE "C"
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}
