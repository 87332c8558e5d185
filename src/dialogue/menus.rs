//! Menu composer
//!
//! `compose` derives the menu for a step from the session and a snapshot of
//! the store taken for this response. It performs no I/O.

use std::collections::BTreeMap;
use crate::models::dialogue::Menu;
use crate::state::{MenuChoice, Session, Step, KEY_CATEGORY};

/// Store contents needed to render one menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub categories: Vec<String>,
    /// Question names keyed by category; only loaded categories are present
    pub questions: BTreeMap<String, Vec<String>>,
}

impl MenuSnapshot {
    pub fn with_categories(categories: impl IntoIterator<Item = String>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            questions: BTreeMap::new(),
        }
    }

    pub fn with_questions(mut self, category: impl Into<String>, questions: impl IntoIterator<Item = String>) -> Self {
        self.questions.insert(category.into(), questions.into_iter().collect());
        self
    }
}

pub fn compose(step: &Step, session: &Session, snapshot: &MenuSnapshot, is_operator: bool) -> Menu {
    if let Step::ConfirmDelete(pending) = step {
        return Menu::Confirm(pending.token.clone());
    }

    let mut labels: Vec<String> = if step.lists_categories() {
        sorted(&snapshot.categories)
    } else if step.lists_questions() {
        session
            .get_string(KEY_CATEGORY)
            .and_then(|category| snapshot.questions.get(&category))
            .map(|questions| sorted(questions))
            .unwrap_or_default()
    } else {
        step.menu_choices().iter().map(|c| c.label().to_string()).collect()
    };

    if *step == Step::Root {
        if is_operator {
            labels.push(MenuChoice::Admin.label().to_string());
        }
        if labels.is_empty() {
            return Menu::Remove;
        }
    } else {
        labels.push(MenuChoice::Back.label().to_string());
    }

    Menu::Keyboard(labels)
}

fn sorted(items: &[String]) -> Vec<String> {
    let mut items = items.to_vec();
    items.sort();
    items.dedup();
    items
}
