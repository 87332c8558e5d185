//! Conversation step graph
//!
//! Every node a user can be in is a `Step`. Steps are grouped into workflow
//! families (`Scenario`); session data belongs to the family that wrote it.
//! Menu navigation is the explicit table in `Step::navigate`, and the
//! universal back action follows `Step::parent`.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::utils::helpers::generate_confirmation_token;

/// What a deletion removes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeletionTarget {
    Category { name: String },
    Question { category: String, question: String },
}

/// A destructive action waiting for a yes/no answer.
///
/// The token is embedded in the callback data of the buttons offered for
/// this deletion; a press carrying any other token is refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingDeletion {
    pub target: DeletionTarget,
    pub token: String,
}

impl PendingDeletion {
    pub fn new(target: DeletionTarget) -> Self {
        Self {
            target,
            token: generate_confirmation_token(),
        }
    }
}

/// A node in the conversation state machine
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Top-level category list
    #[default]
    Root,
    /// Question list of the selected category
    Browsing,

    AdminMenu,
    AddMenu,
    EditMenu,
    DeleteMenu,
    OperatorMenu,

    AddCategoryName,

    AddQuestionCategory,
    AddQuestionText,
    AddQuestionAnswer,

    EditCategorySelect,
    EditCategoryName,

    EditQuestionCategory,
    EditQuestionSelect,
    EditQuestionText,

    EditAnswerCategory,
    EditAnswerSelect,
    EditAnswerText,

    DeleteCategorySelect,

    DeleteQuestionCategory,
    DeleteQuestionSelect,

    ConfirmDelete(PendingDeletion),

    OperatorAddId,
    OperatorRemoveId,
}

/// Workflow family of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    Public,
    AdminNavigation,
    AddCategory,
    AddQuestion,
    EditCategory,
    EditQuestion,
    EditAnswer,
    DeleteCategory,
    DeleteQuestion,
    OperatorAdd,
    OperatorRemove,
}

impl Scenario {
    /// The menu a workflow returns to once it completes
    pub fn home(self) -> Step {
        match self {
            Scenario::Public => Step::Root,
            Scenario::AdminNavigation => Step::AdminMenu,
            Scenario::AddCategory | Scenario::AddQuestion => Step::AddMenu,
            Scenario::EditCategory | Scenario::EditQuestion | Scenario::EditAnswer => Step::EditMenu,
            Scenario::DeleteCategory | Scenario::DeleteQuestion => Step::DeleteMenu,
            Scenario::OperatorAdd | Scenario::OperatorRemove => Step::OperatorMenu,
        }
    }
}

/// Fixed menu affordances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    Back,
    Admin,
    Add,
    Edit,
    Delete,
    Operators,
    AddCategory,
    AddQuestion,
    EditCategory,
    EditQuestion,
    EditAnswer,
    DeleteCategory,
    DeleteQuestion,
    AddOperator,
    RemoveOperator,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 15] = [
        MenuChoice::Back,
        MenuChoice::Admin,
        MenuChoice::Add,
        MenuChoice::Edit,
        MenuChoice::Delete,
        MenuChoice::Operators,
        MenuChoice::AddCategory,
        MenuChoice::AddQuestion,
        MenuChoice::EditCategory,
        MenuChoice::EditQuestion,
        MenuChoice::EditAnswer,
        MenuChoice::DeleteCategory,
        MenuChoice::DeleteQuestion,
        MenuChoice::AddOperator,
        MenuChoice::RemoveOperator,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Back => "⬅️ Back",
            MenuChoice::Admin => "Admin",
            MenuChoice::Add => "➕ Add",
            MenuChoice::Edit => "✏️ Edit",
            MenuChoice::Delete => "🗑 Delete",
            MenuChoice::Operators => "👑 Operators",
            MenuChoice::AddCategory => "➕ Category",
            MenuChoice::AddQuestion => "➕ Question",
            MenuChoice::EditCategory => "✏️ Category",
            MenuChoice::EditQuestion => "✏️ Question",
            MenuChoice::EditAnswer => "✏️ Answer",
            MenuChoice::DeleteCategory => "🗑 Category",
            MenuChoice::DeleteQuestion => "🗑 Question",
            MenuChoice::AddOperator => "➕ Add operator",
            MenuChoice::RemoveOperator => "🗑 Remove operator",
        }
    }

    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.label() == text)
    }

    /// Labels that can never name a category or question
    pub fn is_reserved(text: &str) -> bool {
        Self::from_label(text).is_some()
    }
}

impl Step {
    pub fn scenario(&self) -> Scenario {
        match self {
            Step::Root | Step::Browsing => Scenario::Public,
            Step::AdminMenu | Step::AddMenu | Step::EditMenu | Step::DeleteMenu | Step::OperatorMenu => {
                Scenario::AdminNavigation
            }
            Step::AddCategoryName => Scenario::AddCategory,
            Step::AddQuestionCategory | Step::AddQuestionText | Step::AddQuestionAnswer => Scenario::AddQuestion,
            Step::EditCategorySelect | Step::EditCategoryName => Scenario::EditCategory,
            Step::EditQuestionCategory | Step::EditQuestionSelect | Step::EditQuestionText => Scenario::EditQuestion,
            Step::EditAnswerCategory | Step::EditAnswerSelect | Step::EditAnswerText => Scenario::EditAnswer,
            Step::DeleteCategorySelect => Scenario::DeleteCategory,
            Step::DeleteQuestionCategory | Step::DeleteQuestionSelect => Scenario::DeleteQuestion,
            Step::ConfirmDelete(pending) => match pending.target {
                DeletionTarget::Category { .. } => Scenario::DeleteCategory,
                DeletionTarget::Question { .. } => Scenario::DeleteQuestion,
            },
            Step::OperatorAddId => Scenario::OperatorAdd,
            Step::OperatorRemoveId => Scenario::OperatorRemove,
        }
    }

    /// Where the universal back action leads
    pub fn parent(&self) -> Step {
        match self {
            Step::Root | Step::Browsing | Step::AdminMenu => Step::Root,
            _ => Step::AdminMenu,
        }
    }

    /// Menu navigation table: the step a fixed menu choice leads to from here
    pub fn navigate(&self, choice: MenuChoice) -> Option<Step> {
        use MenuChoice as C;

        let next = match (self, choice) {
            (Step::Root, C::Back) => return None,
            (_, C::Back) => self.parent(),

            (Step::Root | Step::Browsing, C::Admin) => Step::AdminMenu,

            (Step::AdminMenu, C::Add) => Step::AddMenu,
            (Step::AdminMenu, C::Edit) => Step::EditMenu,
            (Step::AdminMenu, C::Delete) => Step::DeleteMenu,
            (Step::AdminMenu, C::Operators) => Step::OperatorMenu,

            (Step::AddMenu, C::AddCategory) => Step::AddCategoryName,
            (Step::AddMenu, C::AddQuestion) => Step::AddQuestionCategory,

            (Step::EditMenu, C::EditCategory) => Step::EditCategorySelect,
            (Step::EditMenu, C::EditQuestion) => Step::EditQuestionCategory,
            (Step::EditMenu, C::EditAnswer) => Step::EditAnswerCategory,

            (Step::DeleteMenu, C::DeleteCategory) => Step::DeleteCategorySelect,
            (Step::DeleteMenu, C::DeleteQuestion) => Step::DeleteQuestionCategory,

            (Step::OperatorMenu, C::AddOperator) => Step::OperatorAddId,
            (Step::OperatorMenu, C::RemoveOperator) => Step::OperatorRemoveId,

            _ => return None,
        };
        Some(next)
    }

    /// Fixed choices offered by a navigation menu, in display order
    pub fn menu_choices(&self) -> &'static [MenuChoice] {
        use MenuChoice as C;

        match self {
            Step::AdminMenu => &[C::Add, C::Edit, C::Delete, C::Operators],
            Step::AddMenu => &[C::AddCategory, C::AddQuestion],
            Step::EditMenu => &[C::EditCategory, C::EditQuestion, C::EditAnswer],
            Step::DeleteMenu => &[C::DeleteCategory, C::DeleteQuestion],
            Step::OperatorMenu => &[C::AddOperator, C::RemoveOperator],
            _ => &[],
        }
    }

    pub fn is_admin(&self) -> bool {
        !matches!(self, Step::Root | Step::Browsing)
    }

    /// Admin sub-menus built from fixed choices
    pub fn is_navigation_menu(&self) -> bool {
        self.scenario() == Scenario::AdminNavigation
    }

    /// Steps whose menu is the category list
    pub fn lists_categories(&self) -> bool {
        matches!(
            self,
            Step::Root
                | Step::AddQuestionCategory
                | Step::EditCategorySelect
                | Step::EditQuestionCategory
                | Step::EditAnswerCategory
                | Step::DeleteCategorySelect
                | Step::DeleteQuestionCategory
        )
    }

    /// Steps whose menu is the question list of the session's category
    pub fn lists_questions(&self) -> bool {
        matches!(
            self,
            Step::Browsing | Step::EditQuestionSelect | Step::EditAnswerSelect | Step::DeleteQuestionSelect
        )
    }

    /// The category-select step of the workflow this step belongs to
    pub fn category_select(&self) -> Option<Step> {
        match self.scenario() {
            Scenario::AddQuestion => Some(Step::AddQuestionCategory),
            Scenario::EditCategory => Some(Step::EditCategorySelect),
            Scenario::EditQuestion => Some(Step::EditQuestionCategory),
            Scenario::EditAnswer => Some(Step::EditAnswerCategory),
            Scenario::DeleteCategory => Some(Step::DeleteCategorySelect),
            Scenario::DeleteQuestion => Some(Step::DeleteQuestionCategory),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Root => "root",
            Step::Browsing => "browsing",
            Step::AdminMenu => "admin_menu",
            Step::AddMenu => "add_menu",
            Step::EditMenu => "edit_menu",
            Step::DeleteMenu => "delete_menu",
            Step::OperatorMenu => "operator_menu",
            Step::AddCategoryName => "add_category_name",
            Step::AddQuestionCategory => "add_question_category",
            Step::AddQuestionText => "add_question_text",
            Step::AddQuestionAnswer => "add_question_answer",
            Step::EditCategorySelect => "edit_category_select",
            Step::EditCategoryName => "edit_category_name",
            Step::EditQuestionCategory => "edit_question_category",
            Step::EditQuestionSelect => "edit_question_select",
            Step::EditQuestionText => "edit_question_text",
            Step::EditAnswerCategory => "edit_answer_category",
            Step::EditAnswerSelect => "edit_answer_select",
            Step::EditAnswerText => "edit_answer_text",
            Step::DeleteCategorySelect => "delete_category_select",
            Step::DeleteQuestionCategory => "delete_question_category",
            Step::DeleteQuestionSelect => "delete_question_select",
            Step::ConfirmDelete(_) => "confirm_delete",
            Step::OperatorAddId => "operator_add_id",
            Step::OperatorRemoveId => "operator_remove_id",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
