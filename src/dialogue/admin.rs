//! Admin workflows
//!
//! `navigate` handles the fixed admin menus, `handle_input` the selection and
//! text-input steps of every workflow. Selections are checked against the
//! store at submission time.

use crate::services::content::{CategoryChange, EntryChange};
use crate::services::operators::OperatorChange;
use crate::state::{DeletionTarget, MenuChoice, PendingDeletion, Session, Step, KEY_CATEGORY, KEY_OLD_QUESTION, KEY_QUESTION};
use crate::utils::errors::Result;
use crate::utils::helpers::parse_user_id;
use crate::utils::logging::log_admin_action;
use super::{texts, ConversationMachine, Transition};

/// Choice made in one of the admin menus
pub(super) async fn navigate(
    machine: &ConversationMachine,
    session: &Session,
    text: &str,
) -> Result<Transition> {
    let Some(target) = MenuChoice::from_label(text).and_then(|choice| session.step.navigate(choice)) else {
        return Ok(Transition::invalid(texts::CHOOSE_FROM_MENU));
    };

    if target.lists_categories() && machine.content.list_categories().await?.is_empty() {
        return Ok(Transition::stay(texts::NO_CATEGORIES));
    }

    let text = machine.landing_text(&target).await?;
    Ok(Transition::enter(target, text))
}

/// Input for a workflow step
pub(super) async fn handle_input(
    machine: &ConversationMachine,
    session: &Session,
    text: &str,
) -> Result<Transition> {
    let step = &session.step;
    match step {
        Step::AddCategoryName => add_category(machine, session.user_id, text).await,
        Step::AddQuestionText => add_question_text(machine, session, text).await,
        Step::AddQuestionAnswer => add_question_answer(machine, session, text).await,
        Step::EditCategoryName => rename_category(machine, session, text).await,
        Step::EditQuestionText => rename_question(machine, session, text).await,
        Step::EditAnswerText => edit_answer(machine, session, text).await,
        Step::OperatorAddId => add_operator(machine, session.user_id, text).await,
        Step::OperatorRemoveId => remove_operator(machine, session.user_id, text).await,

        Step::AddQuestionCategory
        | Step::EditCategorySelect
        | Step::EditQuestionCategory
        | Step::EditAnswerCategory
        | Step::DeleteCategorySelect
        | Step::DeleteQuestionCategory => select_category(machine, step, text).await,

        Step::EditQuestionSelect | Step::EditAnswerSelect | Step::DeleteQuestionSelect => {
            select_question(machine, session, text).await
        }

        _ => Ok(Transition::invalid(texts::CHOOSE_FROM_MENU)),
    }
}

/// The stored category is gone or missing: restart at the workflow's category list
fn lost_category(step: &Step, category: Option<&str>) -> Transition {
    let retry_at = step.category_select().unwrap_or_else(|| step.scenario().home());
    let message = match category {
        Some(name) => texts::category_not_found(name),
        None => texts::prompt(&retry_at),
    };
    Transition::stale(message, retry_at)
}

async fn select_category(machine: &ConversationMachine, step: &Step, text: &str) -> Result<Transition> {
    if !machine.content.category_exists(text).await? {
        return Ok(Transition::stale(texts::category_not_found(text), step.clone()));
    }

    let next = match step {
        Step::AddQuestionCategory => Step::AddQuestionText,
        Step::EditCategorySelect => Step::EditCategoryName,
        Step::EditQuestionCategory => Step::EditQuestionSelect,
        Step::EditAnswerCategory => Step::EditAnswerSelect,
        Step::DeleteQuestionCategory => Step::DeleteQuestionSelect,
        Step::DeleteCategorySelect => {
            let pending = PendingDeletion::new(DeletionTarget::Category { name: text.to_string() });
            let prompt = texts::confirm_prompt(&pending);
            return Ok(Transition::enter(Step::ConfirmDelete(pending), prompt));
        }
        _ => return Ok(Transition::invalid(texts::CHOOSE_FROM_MENU)),
    };

    if next.lists_questions() && machine.content.list_questions(text).await?.is_empty() {
        return Ok(Transition::stay(texts::no_questions_in(text)));
    }

    let prompt = texts::prompt(&next);
    Ok(Transition::Move {
        step: next,
        data: vec![(KEY_CATEGORY, text.to_string())],
        text: prompt,
    })
}

async fn select_question(machine: &ConversationMachine, session: &Session, text: &str) -> Result<Transition> {
    let step = &session.step;
    let Some(category) = session.get_string(KEY_CATEGORY) else {
        return Ok(lost_category(step, None));
    };
    if !machine.content.category_exists(&category).await? {
        return Ok(lost_category(step, Some(&category)));
    }

    let questions = machine.content.list_questions(&category).await?;
    let Some(answer) = questions.get(text) else {
        return Ok(Transition::stale(texts::question_not_found(text), step.clone()));
    };

    let transition = match step {
        Step::EditQuestionSelect => Transition::Move {
            step: Step::EditQuestionText,
            data: vec![(KEY_OLD_QUESTION, text.to_string())],
            text: texts::prompt(&Step::EditQuestionText),
        },
        Step::EditAnswerSelect => Transition::Move {
            step: Step::EditAnswerText,
            data: vec![(KEY_QUESTION, text.to_string())],
            text: format!("Current answer:\n{}\n\n{}", answer, texts::prompt(&Step::EditAnswerText)),
        },
        Step::DeleteQuestionSelect => {
            let pending = PendingDeletion::new(DeletionTarget::Question {
                category,
                question: text.to_string(),
            });
            let prompt = texts::confirm_prompt(&pending);
            Transition::enter(Step::ConfirmDelete(pending), prompt)
        }
        _ => Transition::invalid(texts::CHOOSE_FROM_MENU),
    };
    Ok(transition)
}

async fn add_category(machine: &ConversationMachine, user_id: i64, text: &str) -> Result<Transition> {
    if MenuChoice::is_reserved(text) {
        return Ok(Transition::invalid(texts::RESERVED_LABEL));
    }

    match machine.content.add_category(text).await? {
        CategoryChange::Applied => {
            log_admin_action(user_id, "add_category", Some(text), None);
            Ok(Transition::Complete(texts::category_added(text)))
        }
        CategoryChange::AlreadyExists | CategoryChange::TargetNameTaken | CategoryChange::NotFound => {
            Ok(Transition::invalid(texts::category_exists(text)))
        }
    }
}

async fn add_question_text(machine: &ConversationMachine, session: &Session, text: &str) -> Result<Transition> {
    let Some(category) = session.get_string(KEY_CATEGORY) else {
        return Ok(lost_category(&session.step, None));
    };
    if MenuChoice::is_reserved(text) {
        return Ok(Transition::invalid(texts::RESERVED_LABEL));
    }
    if !machine.content.category_exists(&category).await? {
        return Ok(lost_category(&session.step, Some(&category)));
    }
    if machine.content.list_questions(&category).await?.contains_key(text) {
        return Ok(Transition::invalid(texts::question_exists(text)));
    }

    Ok(Transition::Move {
        step: Step::AddQuestionAnswer,
        data: vec![(KEY_QUESTION, text.to_string())],
        text: texts::prompt(&Step::AddQuestionAnswer),
    })
}

async fn add_question_answer(machine: &ConversationMachine, session: &Session, text: &str) -> Result<Transition> {
    let Some(category) = session.get_string(KEY_CATEGORY) else {
        return Ok(lost_category(&session.step, None));
    };
    let Some(question) = session.get_string(KEY_QUESTION) else {
        return Ok(Transition::stale(texts::prompt(&Step::AddQuestionText), Step::AddQuestionText));
    };

    match machine.content.add_question(&category, &question, text).await? {
        EntryChange::Applied => {
            log_admin_action(session.user_id, "add_question", Some(&category), Some(&question));
            Ok(Transition::Complete(texts::question_added(&category, &question)))
        }
        EntryChange::CategoryNotFound => Ok(lost_category(&session.step, Some(&category))),
        // Taken while the answer was being typed
        EntryChange::QuestionExists | EntryChange::QuestionNotFound => Ok(Transition::stale(
            texts::question_exists(&question),
            Step::AddQuestionText,
        )),
    }
}

async fn rename_category(machine: &ConversationMachine, session: &Session, text: &str) -> Result<Transition> {
    let Some(old) = session.get_string(KEY_CATEGORY) else {
        return Ok(lost_category(&session.step, None));
    };
    if MenuChoice::is_reserved(text) {
        return Ok(Transition::invalid(texts::RESERVED_LABEL));
    }

    match machine.content.rename_category(&old, text).await? {
        CategoryChange::Applied => {
            log_admin_action(session.user_id, "rename_category", Some(&old), Some(text));
            Ok(Transition::Complete(texts::category_renamed(&old, text)))
        }
        CategoryChange::TargetNameTaken | CategoryChange::AlreadyExists => {
            Ok(Transition::invalid(texts::category_exists(text)))
        }
        CategoryChange::NotFound => Ok(lost_category(&session.step, Some(&old))),
    }
}

async fn rename_question(machine: &ConversationMachine, session: &Session, text: &str) -> Result<Transition> {
    let Some(category) = session.get_string(KEY_CATEGORY) else {
        return Ok(lost_category(&session.step, None));
    };
    let Some(old) = session.get_string(KEY_OLD_QUESTION) else {
        return Ok(Transition::stale(texts::prompt(&Step::EditQuestionSelect), Step::EditQuestionSelect));
    };
    if MenuChoice::is_reserved(text) {
        return Ok(Transition::invalid(texts::RESERVED_LABEL));
    }

    match machine.content.rename_question(&category, &old, text).await? {
        EntryChange::Applied => {
            log_admin_action(session.user_id, "rename_question", Some(&category), Some(text));
            Ok(Transition::Complete(texts::question_renamed(&old, text)))
        }
        EntryChange::QuestionExists => Ok(Transition::invalid(texts::question_exists(text))),
        EntryChange::QuestionNotFound => Ok(Transition::stale(
            texts::question_not_found(&old),
            Step::EditQuestionSelect,
        )),
        EntryChange::CategoryNotFound => Ok(lost_category(&session.step, Some(&category))),
    }
}

async fn edit_answer(machine: &ConversationMachine, session: &Session, text: &str) -> Result<Transition> {
    let Some(category) = session.get_string(KEY_CATEGORY) else {
        return Ok(lost_category(&session.step, None));
    };
    let Some(question) = session.get_string(KEY_QUESTION) else {
        return Ok(Transition::stale(texts::prompt(&Step::EditAnswerSelect), Step::EditAnswerSelect));
    };

    match machine.content.edit_answer(&category, &question, text).await? {
        EntryChange::Applied => {
            log_admin_action(session.user_id, "edit_answer", Some(&category), Some(&question));
            Ok(Transition::Complete(texts::answer_updated(&question)))
        }
        EntryChange::QuestionNotFound | EntryChange::QuestionExists => Ok(Transition::stale(
            texts::question_not_found(&question),
            Step::EditAnswerSelect,
        )),
        EntryChange::CategoryNotFound => Ok(lost_category(&session.step, Some(&category))),
    }
}

async fn add_operator(machine: &ConversationMachine, user_id: i64, text: &str) -> Result<Transition> {
    let Some(target) = parse_user_id(text) else {
        return Ok(Transition::invalid(texts::NOT_A_USER_ID));
    };

    match machine.operators.add_operator(target).await? {
        OperatorChange::Applied => {
            log_admin_action(user_id, "add_operator", Some(&target.to_string()), None);
            Ok(Transition::Complete(texts::operator_added(target)))
        }
        OperatorChange::AlreadyPresent | OperatorChange::NotPresent | OperatorChange::LastOperator => {
            Ok(Transition::invalid(texts::operator_already_present(target)))
        }
    }
}

async fn remove_operator(machine: &ConversationMachine, user_id: i64, text: &str) -> Result<Transition> {
    let Some(target) = parse_user_id(text) else {
        return Ok(Transition::invalid(texts::NOT_A_USER_ID));
    };

    match machine.operators.remove_operator(target).await? {
        OperatorChange::Applied => {
            log_admin_action(user_id, "remove_operator", Some(&target.to_string()), None);
            if target == user_id {
                // No admin menu left to return to
                return Ok(Transition::Leave {
                    step: Step::Root,
                    text: texts::operator_removed(target),
                });
            }
            Ok(Transition::Complete(texts::operator_removed(target)))
        }
        OperatorChange::NotPresent | OperatorChange::AlreadyPresent => {
            Ok(Transition::invalid(texts::operator_not_present(target)))
        }
        OperatorChange::LastOperator => Ok(Transition::invalid(texts::last_operator(target))),
    }
}
