//! Two-phase deletion
//!
//! The pending target travels inside `Step::ConfirmDelete` together with the
//! token of its buttons; a matching yes/no callback resolves it and always
//! lands on the admin root.

use crate::models::dialogue::ConfirmChoice;
use crate::services::content::{CategoryChange, EntryChange};
use crate::state::{DeletionTarget, PendingDeletion, Step};
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;
use super::{texts, ConversationMachine, Transition};

pub(super) async fn resolve(
    machine: &ConversationMachine,
    user_id: i64,
    pending: &PendingDeletion,
    choice: ConfirmChoice,
) -> Result<Transition> {
    let text = match choice {
        ConfirmChoice::No => texts::DELETION_CANCELLED.to_string(),
        ConfirmChoice::Yes => execute(machine, user_id, pending).await?,
    };

    Ok(Transition::Leave {
        step: Step::AdminMenu,
        text: format!("{}\n\n{}", text, machine.admin_panel().await?),
    })
}

async fn execute(machine: &ConversationMachine, user_id: i64, pending: &PendingDeletion) -> Result<String> {
    match &pending.target {
        DeletionTarget::Category { name } => match machine.content.delete_category(name).await? {
            CategoryChange::Applied => {
                log_admin_action(user_id, "delete_category", Some(name), None);
                Ok(texts::category_deleted(name))
            }
            _ => Ok(texts::category_gone(name)),
        },
        DeletionTarget::Question { category, question } => {
            match machine.content.delete_question(category, question).await? {
                EntryChange::Applied => {
                    log_admin_action(user_id, "delete_question", Some(category), Some(question));
                    Ok(texts::question_deleted(question))
                }
                EntryChange::CategoryNotFound => Ok(texts::category_gone(category)),
                EntryChange::QuestionNotFound | EntryChange::QuestionExists => {
                    Ok(texts::question_gone(question))
                }
            }
        }
    }
}
