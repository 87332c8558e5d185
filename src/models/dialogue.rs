//! Inbound events and outbound responses of the conversation core
//!
//! These types are transport-neutral: the Telegram handlers translate
//! updates into events and render responses into keyboards.

use serde::{Deserialize, Serialize};

/// Callback payload prefix of the affirmative confirmation button
pub const CONFIRM_YES: &str = "confirm_yes";
/// Callback payload prefix of the negative confirmation button
pub const CONFIRM_NO: &str = "confirm_no";

/// Free-form text sent by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEvent {
    pub user_id: i64,
    pub text: String,
}

impl TextEvent {
    pub fn new(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: text.into(),
        }
    }
}

/// Yes/no answer delivered through the callback channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Yes => CONFIRM_YES,
            Self::No => CONFIRM_NO,
        }
    }

    /// Button payload: `<prefix>:<token>`
    pub fn callback_data(self, token: &str) -> String {
        format!("{}:{}", self.prefix(), token)
    }
}

/// A confirmation callback, carrying the token of the buttons pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmEvent {
    pub user_id: i64,
    pub choice: ConfirmChoice,
    pub token: String,
}

impl ConfirmEvent {
    pub fn new(user_id: i64, choice: ConfirmChoice, token: impl Into<String>) -> Self {
        Self {
            user_id,
            choice,
            token: token.into(),
        }
    }

    /// Parse callback data; anything but a tokenized yes/no payload is `None`
    pub fn from_callback_data(user_id: i64, data: &str) -> Option<Self> {
        let (prefix, token) = data.split_once(':')?;
        let choice = match prefix {
            CONFIRM_YES => ConfirmChoice::Yes,
            CONFIRM_NO => ConfirmChoice::No,
            _ => return None,
        };
        if token.is_empty() {
            return None;
        }
        Some(Self::new(user_id, choice, token))
    }
}

/// Menu attached to a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Menu {
    /// Reply keyboard, one label per row, in order
    Keyboard(Vec<String>),
    /// Inline yes/no buttons for the pending deletion with this token
    Confirm(String),
    /// Remove any reply keyboard
    Remove,
}

impl Menu {
    /// Labels of a reply keyboard; empty for other menus
    pub fn labels(&self) -> &[String] {
        match self {
            Menu::Keyboard(labels) => labels,
            Menu::Confirm(_) | Menu::Remove => &[],
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels().iter().any(|l| l == label)
    }
}

/// Text plus the menu to present next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub text: String,
    pub menu: Menu,
    /// Text carries HTML markup (user content already escaped)
    pub rich_text: bool,
}
