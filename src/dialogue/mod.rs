//! Conversation state machine
//!
//! `ConversationMachine` turns inbound events into responses. Each event is
//! routed by the current step to a handler that inspects the store and
//! returns a `Transition`; `apply` is the only place the session changes and
//! the next menu is composed.

pub mod admin;
pub mod browse;
pub mod confirm;
pub mod menus;
pub mod texts;

#[cfg(test)]
mod proptests;

use std::sync::Arc;
use tracing::debug;
use crate::models::dialogue::{ConfirmEvent, Response, TextEvent};
use crate::services::content::ContentStore;
use crate::services::operators::OperatorRegistry;
use crate::state::{MenuChoice, Session, SessionStore, Step, KEY_CATEGORY};
use crate::utils::errors::Result;
use crate::utils::helpers::normalize_input;
use crate::utils::logging::{log_rejected_input, log_user_action};
use self::menus::MenuSnapshot;

/// Recoverable failure of an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Input rejected, step retained
    Validation(String),
    /// Admin action by a non-operator
    Authorization,
    /// The selected category or question no longer exists
    StaleReference { message: String, retry_at: Step },
    /// Confirmation callback with nothing pending, or from other buttons
    UnsupportedAction,
}

impl Failure {
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::Validation(_) => "validation",
            Failure::Authorization => "authorization",
            Failure::StaleReference { .. } => "stale_reference",
            Failure::UnsupportedAction => "unsupported_action",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Failure::Validation(message) | Failure::StaleReference { message, .. } => message.clone(),
            Failure::Authorization => texts::ACCESS_DENIED.to_string(),
            Failure::UnsupportedAction => texts::UNSUPPORTED_ACTION.to_string(),
        }
    }
}

/// Result of handling one event, applied to the session by `apply`
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Keep step and data
    Stay { text: String, rich: bool },
    /// Go to `step`, then store `data`
    Move {
        step: Step,
        data: Vec<(&'static str, String)>,
        text: String,
    },
    /// Workflow finished: back to the menu that launched it
    Complete(String),
    /// Go to `step` with empty data
    Leave { step: Step, text: String },
    Fail(Failure),
}

impl Transition {
    pub fn stay(text: impl Into<String>) -> Self {
        Transition::Stay { text: text.into(), rich: false }
    }

    pub fn enter(step: Step, text: impl Into<String>) -> Self {
        Transition::Move { step, data: Vec::new(), text: text.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Transition::Fail(Failure::Validation(message.into()))
    }

    pub fn stale(message: impl Into<String>, retry_at: Step) -> Self {
        Transition::Fail(Failure::StaleReference { message: message.into(), retry_at })
    }
}

/// The dialogue engine shared by all chats
pub struct ConversationMachine {
    content: Arc<dyn ContentStore>,
    operators: Arc<OperatorRegistry>,
    sessions: Arc<SessionStore>,
}

impl ConversationMachine {
    pub fn new(
        content: Arc<dyn ContentStore>,
        operators: Arc<OperatorRegistry>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self { content, operators, sessions }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// `/start`: reset the session and show the categories
    pub async fn start(&self, user_id: i64) -> Result<Response> {
        let session = self.sessions.get(user_id).await;
        log_user_action(user_id, "start", None);
        self.apply(session, Transition::Leave { step: Step::Root, text: texts::WELCOME.to_string() })
            .await
    }

    /// `/admin` or the admin entry label
    pub async fn enter_admin(&self, user_id: i64) -> Result<Response> {
        let session = self.sessions.get(user_id).await;
        let transition = self.admin_entry(user_id).await?;
        self.apply(session, transition).await
    }

    /// `/help`: usage text, session untouched
    pub async fn help(&self, user_id: i64) -> Result<Response> {
        let session = self.sessions.get(user_id).await;
        self.apply(session, Transition::stay(texts::HELP)).await
    }

    pub async fn handle_text(&self, event: TextEvent) -> Result<Response> {
        let session = self.sessions.get(event.user_id).await;
        debug!(user_id = event.user_id, step = %session.step, "Handling text");

        let transition = self.route_text(&session, &event.text).await?;
        self.apply(session, transition).await
    }

    pub async fn handle_confirm(&self, event: ConfirmEvent) -> Result<Response> {
        let session = self.sessions.get(event.user_id).await;
        debug!(user_id = event.user_id, step = %session.step, choice = ?event.choice, "Handling confirmation");

        let transition = match &session.step {
            Step::ConfirmDelete(pending) if pending.token != event.token => {
                debug!(user_id = event.user_id, "Confirmation from stale buttons");
                Transition::Fail(Failure::UnsupportedAction)
            }
            Step::ConfirmDelete(_) if !self.operators.is_operator(event.user_id).await => {
                Transition::Fail(Failure::Authorization)
            }
            Step::ConfirmDelete(pending) => {
                confirm::resolve(self, event.user_id, pending, event.choice).await?
            }
            _ => Transition::Fail(Failure::UnsupportedAction),
        };
        self.apply(session, transition).await
    }

    /// Callback data the bot never issued
    pub async fn unsupported(&self, user_id: i64) -> Result<Response> {
        let session = self.sessions.get(user_id).await;
        self.apply(session, Transition::Fail(Failure::UnsupportedAction)).await
    }

    async fn route_text(&self, session: &Session, raw: &str) -> Result<Transition> {
        let Some(text) = normalize_input(raw) else {
            return Ok(Transition::invalid(texts::EMPTY_INPUT));
        };

        if session.step.is_admin() && !self.operators.is_operator(session.user_id).await {
            return Ok(Transition::Fail(Failure::Authorization));
        }

        if MenuChoice::from_label(text) == Some(MenuChoice::Back) {
            return self.back(session).await;
        }

        match &session.step {
            Step::Root | Step::Browsing => browse::handle_text(self, session, text).await,
            Step::ConfirmDelete(pending) => Ok(Transition::stay(format!(
                "{}\n\n{}",
                texts::confirm_prompt(pending),
                texts::CONFIRM_REMINDER
            ))),
            step if step.is_navigation_menu() => admin::navigate(self, session, text).await,
            _ => admin::handle_input(self, session, text).await,
        }
    }

    async fn back(&self, session: &Session) -> Result<Transition> {
        match session.step.navigate(MenuChoice::Back) {
            None => Ok(Transition::stay(texts::ALREADY_AT_ROOT)),
            Some(parent) => {
                let text = self.landing_text(&parent).await?;
                Ok(Transition::Leave { step: parent, text })
            }
        }
    }

    async fn admin_entry(&self, user_id: i64) -> Result<Transition> {
        if !self.operators.is_operator(user_id).await {
            return Ok(Transition::Fail(Failure::Authorization));
        }
        Ok(Transition::Leave {
            step: Step::AdminMenu,
            text: self.admin_panel().await?,
        })
    }

    async fn admin_panel(&self) -> Result<String> {
        let overview = self.content.overview().await?;
        Ok(texts::admin_panel(&overview))
    }

    /// Text shown when arriving at `step` through navigation
    async fn landing_text(&self, step: &Step) -> Result<String> {
        match step {
            Step::AdminMenu => self.admin_panel().await,
            _ => Ok(texts::prompt(step)),
        }
    }

    async fn apply(&self, mut session: Session, transition: Transition) -> Result<Response> {
        let user_id = session.user_id;
        let mut rich_text = false;

        let text = match transition {
            Transition::Stay { text, rich } => {
                rich_text = rich;
                text
            }
            Transition::Move { step, data, text } => {
                session.set_step(step);
                for (key, value) in data {
                    session.set_data(key, value)?;
                }
                text
            }
            Transition::Complete(text) => {
                let home = session.step.scenario().home();
                session.reset_to(home);
                text
            }
            Transition::Leave { step, text } => {
                session.reset_to(step);
                text
            }
            Transition::Fail(failure) => {
                log_rejected_input(user_id, session.step.name(), failure.kind());
                match &failure {
                    Failure::Authorization if session.step.is_admin() => session.clear(),
                    Failure::StaleReference { retry_at, .. } => session.set_step(retry_at.clone()),
                    _ => {}
                }
                failure.message()
            }
        };

        let is_operator = self.operators.is_operator(user_id).await;
        let snapshot = self.snapshot(&session).await?;
        let menu = menus::compose(&session.step, &session, &snapshot, is_operator);
        self.sessions.save(session).await;

        Ok(Response { text, menu, rich_text })
    }

    /// Read what the menu of the session's step needs, fresh from the store
    async fn snapshot(&self, session: &Session) -> Result<MenuSnapshot> {
        let mut snapshot = MenuSnapshot::default();
        if session.step.lists_categories() {
            snapshot.categories = self.content.list_categories().await?.into_iter().collect();
        }
        if session.step.lists_questions() {
            if let Some(category) = session.get_string(KEY_CATEGORY) {
                let questions = self.content.list_questions(&category).await?;
                snapshot = snapshot.with_questions(category, questions.into_keys());
            }
        }
        Ok(snapshot)
    }
}

impl std::fmt::Debug for ConversationMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationMachine")
            .field("operators", &self.operators)
            .finish_non_exhaustive()
    }
}
