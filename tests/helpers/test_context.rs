//! Test context for conversation tests
//!
//! Wires a `ConversationMachine` over in-memory stores so tests can drive
//! whole dialogues and inspect the stores afterwards.

use std::sync::Arc;
use std::time::Duration;
use FaqBuddy::dialogue::ConversationMachine;
use FaqBuddy::models::dialogue::{ConfirmChoice, ConfirmEvent, Response, TextEvent};
use FaqBuddy::models::faq::Category;
use FaqBuddy::services::{MemoryContentStore, MemoryOperatorStorage, OperatorRegistry};
use FaqBuddy::state::{SessionStore, Step};

/// Operator seeded into every context
pub const OPERATOR_ID: i64 = 555666777;

/// A user without operator rights
pub const VISITOR_ID: i64 = 123456789;

/// Unified test context that manages all test components
pub struct TestContext {
    pub content: Arc<MemoryContentStore>,
    pub operator_storage: Arc<MemoryOperatorStorage>,
    pub operators: Arc<OperatorRegistry>,
    pub sessions: Arc<SessionStore>,
    pub machine: Arc<ConversationMachine>,
}

impl TestContext {
    /// Empty content, one operator
    pub async fn new() -> Self {
        Self::with_categories(Vec::new()).await
    }

    pub async fn with_categories(categories: Vec<Category>) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let content = Arc::new(MemoryContentStore::with_categories(categories));
        let operator_storage = Arc::new(MemoryOperatorStorage::new(vec![OPERATOR_ID]));
        let operators = Arc::new(
            OperatorRegistry::load(operator_storage.clone())
                .await
                .expect("Failed to load operators"),
        );
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(3600)));
        let machine = Arc::new(ConversationMachine::new(
            content.clone(),
            operators.clone(),
            sessions.clone(),
        ));

        Self {
            content,
            operator_storage,
            operators,
            sessions,
            machine,
        }
    }

    /// Context over the sample categories
    pub async fn seeded() -> Self {
        Self::with_categories(sample_categories()).await
    }

    pub async fn start(&self, user_id: i64) -> Response {
        self.machine.start(user_id).await.expect("start failed")
    }

    pub async fn admin(&self, user_id: i64) -> Response {
        self.machine.enter_admin(user_id).await.expect("admin failed")
    }

    pub async fn text(&self, user_id: i64, text: &str) -> Response {
        self.machine
            .handle_text(TextEvent::new(user_id, text))
            .await
            .expect("text event failed")
    }

    /// Press a button of the confirmation currently pending for `user_id`
    pub async fn confirm(&self, user_id: i64, choice: ConfirmChoice) -> Response {
        let token = self.pending_token(user_id).await.unwrap_or_default();
        self.confirm_with_token(user_id, choice, &token).await
    }

    /// Press a button carrying `token`, pending or not
    pub async fn confirm_with_token(&self, user_id: i64, choice: ConfirmChoice, token: &str) -> Response {
        self.machine
            .handle_confirm(ConfirmEvent::new(user_id, choice, token))
            .await
            .expect("confirm event failed")
    }

    /// Token of the pending confirmation, if any
    pub async fn pending_token(&self, user_id: i64) -> Option<String> {
        match self.step(user_id).await {
            Step::ConfirmDelete(pending) => Some(pending.token),
            _ => None,
        }
    }

    /// Send several texts in a row, returning the last response
    pub async fn walk(&self, user_id: i64, texts: &[&str]) -> Response {
        let mut last = None;
        for text in texts {
            last = Some(self.text(user_id, text).await);
        }
        last.expect("walk needs at least one text")
    }

    pub async fn step(&self, user_id: i64) -> Step {
        self.sessions.get(user_id).await.step
    }
}

/// Category with the given question/answer pairs
pub fn category(name: &str, entries: &[(&str, &str)]) -> Category {
    let mut category = Category::new(name);
    for (question, answer) in entries {
        category.questions.insert(question.to_string(), answer.to_string());
    }
    category
}

/// Colors (two questions), Shapes (one question) and Empty (none)
pub fn sample_categories() -> Vec<Category> {
    vec![
        category("Colors", &[("Why blue?", "Sky"), ("Is red hot?", "Yes")]),
        category("Shapes", &[("Round?", "Circle")]),
        category("Empty", &[]),
    ]
}
