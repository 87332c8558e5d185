//! User-facing messages

use teloxide::utils::html;
use crate::models::faq::CategorySummary;
use crate::state::{DeletionTarget, PendingDeletion, Step};

pub const WELCOME: &str = "👋 Welcome! Choose a category to see its questions.";
pub const HELP: &str = "Pick a category from the menu, then a question to read its answer.\n\n\
/start - show the categories\n\
/admin - open the admin panel (operators only)\n\
/help - show this message";
pub const ALREADY_AT_ROOT: &str = "You are already at the main menu.";
pub const CHOOSE_FROM_MENU: &str = "Please choose an option from the menu.";
pub const EMPTY_INPUT: &str = "⚠️ The value cannot be empty.";
pub const RESERVED_LABEL: &str = "⚠️ This name is reserved by the menu. Please send another one.";
pub const ACCESS_DENIED: &str = "⛔ You don't have access to the admin panel.";
pub const UNSUPPORTED_ACTION: &str = "⚠️ Unsupported action.";
pub const NO_CATEGORIES: &str = "There are no categories yet. Add one first.";
pub const NOT_A_USER_ID: &str = "⚠️ Please send a numeric user id.";
pub const CONFIRM_REMINDER: &str = "Please confirm or cancel the deletion with the buttons below.";
pub const DELETION_CANCELLED: &str = "❎ Deletion cancelled.";
pub const INTERNAL_ERROR: &str = "Something went wrong. Please try again later.";

/// Prompt shown on entering a step
pub fn prompt(step: &Step) -> String {
    match step {
        Step::Root => "Choose a category:".to_string(),
        Step::Browsing => "Choose a question:".to_string(),
        Step::AdminMenu => "Admin panel. Choose an action:".to_string(),
        Step::AddMenu => "What do you want to add?".to_string(),
        Step::EditMenu => "What do you want to edit?".to_string(),
        Step::DeleteMenu => "What do you want to delete?".to_string(),
        Step::OperatorMenu => "Manage operators:".to_string(),
        Step::AddCategoryName => "Send the name of the new category.".to_string(),
        Step::AddQuestionText => "Send the question.".to_string(),
        Step::AddQuestionAnswer => "Send the answer.".to_string(),
        Step::EditCategoryName => "Send the new name of the category.".to_string(),
        Step::EditQuestionText => "Send the new text of the question.".to_string(),
        Step::EditAnswerText => "Send the new answer.".to_string(),
        Step::AddQuestionCategory
        | Step::EditCategorySelect
        | Step::EditQuestionCategory
        | Step::EditAnswerCategory
        | Step::DeleteCategorySelect
        | Step::DeleteQuestionCategory => "Choose a category:".to_string(),
        Step::EditQuestionSelect | Step::EditAnswerSelect | Step::DeleteQuestionSelect => {
            "Choose a question:".to_string()
        }
        Step::ConfirmDelete(pending) => confirm_prompt(pending),
        Step::OperatorAddId => "Send the user id of the new operator.".to_string(),
        Step::OperatorRemoveId => "Send the user id of the operator to remove.".to_string(),
    }
}

/// Admin panel header with the category overview
pub fn admin_panel(overview: &[CategorySummary]) -> String {
    let mut text = String::from("🛠 Admin panel\n\n");
    if overview.is_empty() {
        text.push_str("No categories yet.");
    } else {
        text.push_str("Categories:\n");
        for summary in overview {
            text.push_str(&format!("• {} ({})\n", summary.name, summary.question_count));
        }
    }
    text.push_str("\nChoose an action:");
    text
}

pub fn confirm_prompt(pending: &PendingDeletion) -> String {
    match &pending.target {
        DeletionTarget::Category { name } => {
            format!("Delete the category «{}» and all of its questions?", name)
        }
        DeletionTarget::Question { category, question } => {
            format!("Delete the question «{}» from «{}»?", question, category)
        }
    }
}

/// Question and answer, HTML-formatted with user content escaped
pub fn answer(question: &str, answer: &str) -> String {
    format!(
        "<b>Question:</b> {}\n\n<b>Answer:</b> {}",
        html::escape(question),
        html::escape(answer)
    )
}

pub fn category_added(name: &str) -> String {
    format!("✅ Category «{}» added.", name)
}

pub fn category_exists(name: &str) -> String {
    format!("⚠️ Category «{}» already exists. Send another name.", name)
}

pub fn category_renamed(old: &str, new: &str) -> String {
    format!("✅ Category «{}» renamed to «{}».", old, new)
}

pub fn category_not_found(name: &str) -> String {
    format!("⚠️ Category «{}» was not found. Choose one from the list.", name)
}

/// Deletion target vanished before it was confirmed
pub fn category_gone(name: &str) -> String {
    format!("⚠️ Category «{}» no longer exists.", name)
}

pub fn question_gone(question: &str) -> String {
    format!("⚠️ Question «{}» no longer exists.", question)
}

pub fn category_deleted(name: &str) -> String {
    format!("🗑 Category «{}» deleted.", name)
}

pub fn question_exists(question: &str) -> String {
    format!("⚠️ Question «{}» already exists in this category. Send another one.", question)
}

pub fn question_not_found(question: &str) -> String {
    format!("⚠️ Question «{}» was not found. Choose one from the list.", question)
}

pub fn question_added(category: &str, question: &str) -> String {
    format!("✅ Question «{}» added to «{}».", question, category)
}

pub fn question_renamed(old: &str, new: &str) -> String {
    format!("✅ Question «{}» renamed to «{}».", old, new)
}

pub fn question_deleted(question: &str) -> String {
    format!("🗑 Question «{}» deleted.", question)
}

pub fn answer_updated(question: &str) -> String {
    format!("✅ Answer to «{}» updated.", question)
}

pub fn no_questions_in(category: &str) -> String {
    format!("There are no questions in «{}» yet.", category)
}

pub fn operator_added(user_id: i64) -> String {
    format!("✅ User {} is now an operator.", user_id)
}

pub fn operator_already_present(user_id: i64) -> String {
    format!("⚠️ User {} is already an operator.", user_id)
}

pub fn operator_removed(user_id: i64) -> String {
    format!("✅ User {} is no longer an operator.", user_id)
}

pub fn operator_not_present(user_id: i64) -> String {
    format!("⚠️ User {} is not an operator.", user_id)
}

pub fn last_operator(user_id: i64) -> String {
    format!("⚠️ User {} is the last operator and cannot be removed.", user_id)
}
