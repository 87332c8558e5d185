//! PostgreSQL content store tests
//!
//! Need Docker (or `TEST_DATABASE_URL`); run with `cargo test -- --ignored`.

mod helpers;

use helpers::*;
use serial_test::serial;
use FaqBuddy::database::FaqRepository;
use FaqBuddy::services::{CategoryChange, ContentStore, EntryChange};

async fn repository() -> (TestDatabase, FaqRepository) {
    let db = TestDatabase::new().await.expect("Failed to start test database");
    db.cleanup().await.expect("Failed to clean database");
    let repo = FaqRepository::new(db.pool.clone());
    (db, repo)
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_add_category_twice() {
    let (db, repo) = repository().await;

    assert_eq!(repo.add_category("Colors").await.unwrap(), CategoryChange::Applied);
    assert_eq!(repo.add_category("Colors").await.unwrap(), CategoryChange::AlreadyExists);
    assert_eq!(db.count_records("faq_categories").await.unwrap(), 1);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_question_lifecycle() {
    let (_db, repo) = repository().await;
    let _ = repo.add_category("Colors").await.unwrap();

    assert_eq!(repo.add_question("Colors", "Why blue?", "Sky").await.unwrap(), EntryChange::Applied);
    assert_eq!(
        repo.add_question("Colors", "Why blue?", "Again").await.unwrap(),
        EntryChange::QuestionExists
    );
    assert_eq!(
        repo.add_question("Planets", "Why?", "Because").await.unwrap(),
        EntryChange::CategoryNotFound
    );

    let questions = repo.list_questions("Colors").await.unwrap();
    assert_eq!(questions.get("Why blue?").map(String::as_str), Some("Sky"));

    assert_eq!(repo.edit_answer("Colors", "Why blue?", "Rayleigh").await.unwrap(), EntryChange::Applied);
    assert_eq!(repo.delete_question("Colors", "Why blue?").await.unwrap(), EntryChange::Applied);
    assert!(repo.list_questions("Colors").await.unwrap().is_empty());
    assert_eq!(
        repo.delete_question("Colors", "Why blue?").await.unwrap(),
        EntryChange::QuestionNotFound
    );
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_rename_question_is_atomic() {
    let (_db, repo) = repository().await;
    let _ = repo.add_category("Colors").await.unwrap();
    let _ = repo.add_question("Colors", "Why blue?", "Sky").await.unwrap();
    let _ = repo.add_question("Colors", "Is red hot?", "Yes").await.unwrap();

    assert_eq!(
        repo.rename_question("Colors", "Why blue?", "Is red hot?").await.unwrap(),
        EntryChange::QuestionExists
    );
    assert_eq!(
        repo.rename_question("Colors", "Why blue?", "Why is the sky blue?").await.unwrap(),
        EntryChange::Applied
    );

    let questions = repo.list_questions("Colors").await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions.get("Why is the sky blue?").map(String::as_str), Some("Sky"));
    assert_eq!(questions.get("Is red hot?").map(String::as_str), Some("Yes"));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_rename_and_delete_category() {
    let (_db, repo) = repository().await;
    let _ = repo.add_category("Colors").await.unwrap();
    let _ = repo.add_category("Shapes").await.unwrap();
    let _ = repo.add_question("Colors", "Why blue?", "Sky").await.unwrap();

    assert_eq!(repo.rename_category("Colors", "Shapes").await.unwrap(), CategoryChange::TargetNameTaken);
    assert_eq!(repo.rename_category("Planets", "Moons").await.unwrap(), CategoryChange::NotFound);
    assert_eq!(repo.rename_category("Colors", "Hues").await.unwrap(), CategoryChange::Applied);
    assert_eq!(repo.list_questions("Hues").await.unwrap().len(), 1);

    assert_eq!(repo.delete_category("Hues").await.unwrap(), CategoryChange::Applied);
    assert_eq!(repo.delete_category("Hues").await.unwrap(), CategoryChange::NotFound);
    assert!(repo.list_questions("Hues").await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_overview_is_sorted_with_counts() {
    let (_db, repo) = repository().await;
    for name in ["b", "a", "c"] {
        let _ = repo.add_category(name).await.unwrap();
    }
    let _ = repo.add_question("b", "q1", "a1").await.unwrap();
    let _ = repo.add_question("b", "q2", "a2").await.unwrap();

    let names: Vec<String> = repo.list_categories().await.unwrap().into_iter().collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let overview = repo.overview().await.unwrap();
    let counts: Vec<(&str, i64)> = overview.iter().map(|s| (s.name.as_str(), s.question_count)).collect();
    assert_eq!(counts, vec![("a", 0), ("b", 2), ("c", 0)]);
}
