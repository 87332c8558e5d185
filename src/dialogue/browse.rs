//! Public browsing: categories, questions and answers

use crate::state::{MenuChoice, Session, Step, KEY_CATEGORY};
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use super::{texts, ConversationMachine, Transition};

pub(super) async fn handle_text(
    machine: &ConversationMachine,
    session: &Session,
    text: &str,
) -> Result<Transition> {
    if MenuChoice::from_label(text) == Some(MenuChoice::Admin) {
        return machine.admin_entry(session.user_id).await;
    }

    // A question of the open category takes precedence over a category name
    if session.step == Step::Browsing {
        if let Some(category) = session.get_string(KEY_CATEGORY) {
            let questions = machine.content.list_questions(&category).await?;
            if let Some(answer) = questions.get(text) {
                log_user_action(session.user_id, "read_answer", Some(text));
                return Ok(Transition::Stay {
                    text: texts::answer(text, answer),
                    rich: true,
                });
            }
        }
    }

    if machine.content.category_exists(text).await? {
        if machine.content.list_questions(text).await?.is_empty() {
            return Ok(Transition::stay(texts::no_questions_in(text)));
        }

        log_user_action(session.user_id, "open_category", Some(text));
        return Ok(Transition::Move {
            step: Step::Browsing,
            data: vec![(KEY_CATEGORY, text.to_string())],
            text: texts::prompt(&Step::Browsing),
        });
    }

    Ok(Transition::invalid(texts::CHOOSE_FROM_MENU))
}
