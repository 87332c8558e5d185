//! Property-based tests for the conversation machine
//!
//! Arbitrary event sequences are replayed against in-memory stores.

use super::*;
use crate::models::dialogue::{ConfirmChoice, Menu};
use crate::models::faq::Category;
use crate::services::content::MemoryContentStore;
use crate::services::operators::MemoryOperatorStorage;
use proptest::prelude::*;
use std::time::Duration;

const OPERATOR: i64 = 1;
const VISITOR: i64 = 2;

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Event {
    Text(String),
    /// Press on the buttons of the current confirmation
    Confirm(ConfirmChoice),
    /// Press on buttons of a confirmation that is no longer pending
    StaleConfirm(ConfirmChoice),
    Start,
    Admin,
}

fn seeded_content() -> MemoryContentStore {
    let mut colors = Category::new("Colors");
    colors.questions.insert("Why blue?".to_string(), "Sky".to_string());
    colors.questions.insert("Is red hot?".to_string(), "Yes".to_string());
    let mut shapes = Category::new("Shapes");
    shapes.questions.insert("Round?".to_string(), "Circle".to_string());
    MemoryContentStore::with_categories(vec![colors, shapes, Category::new("Empty")])
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

async fn machine() -> ConversationMachine {
    let storage = Arc::new(MemoryOperatorStorage::new(vec![OPERATOR]));
    let operators = Arc::new(OperatorRegistry::load(storage).await.unwrap());
    ConversationMachine::new(
        Arc::new(seeded_content()),
        operators,
        Arc::new(SessionStore::new(Duration::from_secs(3600))),
    )
}

async fn send(machine: &ConversationMachine, user_id: i64, event: Event) -> Response {
    match event {
        Event::Text(text) => machine.handle_text(TextEvent::new(user_id, text)).await.unwrap(),
        Event::Confirm(choice) => {
            let token = match machine.sessions().get(user_id).await.step {
                Step::ConfirmDelete(pending) => pending.token,
                _ => "expired".to_string(),
            };
            machine.handle_confirm(ConfirmEvent::new(user_id, choice, token)).await.unwrap()
        }
        Event::StaleConfirm(choice) => {
            machine.handle_confirm(ConfirmEvent::new(user_id, choice, "expired")).await.unwrap()
        }
        Event::Start => machine.start(user_id).await.unwrap(),
        Event::Admin => machine.enter_admin(user_id).await.unwrap(),
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_label() -> impl Strategy<Value = String> {
    let labels: Vec<String> = MenuChoice::ALL.iter().map(|c| c.label().to_string()).collect();
    proptest::sample::select(labels)
}

fn arb_content_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Colors".to_string()),
        Just("Shapes".to_string()),
        Just("Empty".to_string()),
        Just("Why blue?".to_string()),
        Just("Round?".to_string()),
        Just("123".to_string()),
        Just("   ".to_string()),
        "[a-zA-Z ]{1,12}",
    ]
}

fn arb_choice() -> impl Strategy<Value = ConfirmChoice> {
    prop_oneof![Just(ConfirmChoice::Yes), Just(ConfirmChoice::No)]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => arb_label().prop_map(Event::Text),
        4 => arb_content_text().prop_map(Event::Text),
        1 => arb_choice().prop_map(Event::Confirm),
        1 => arb_choice().prop_map(Event::StaleConfirm),
        1 => Just(Event::Start),
        1 => Just(Event::Admin),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // A non-operator never reaches an admin step
    #[test]
    fn prop_visitor_never_enters_admin(events in proptest::collection::vec(arb_event(), 0..30)) {
        let rt = runtime();
        rt.block_on(async {
            let machine = machine().await;
            for event in events {
                let response = send(&machine, VISITOR, event).await;
                let session = machine.sessions().get(VISITOR).await;
                prop_assert!(!session.step.is_admin(), "visitor reached {}", session.step);
                prop_assert!(!response.menu.contains(MenuChoice::Admin.label()));
            }
            Ok(())
        })?;
    }

    // Back from any non-root step leaves that step
    #[test]
    fn prop_back_leaves_current_step(events in proptest::collection::vec(arb_event(), 0..30)) {
        let rt = runtime();
        rt.block_on(async {
            let machine = machine().await;
            for event in events {
                send(&machine, OPERATOR, event).await;
            }

            let before = machine.sessions().get(OPERATOR).await.step;
            let response = send(&machine, OPERATOR, Event::Text(MenuChoice::Back.label().to_string())).await;
            let after = machine.sessions().get(OPERATOR).await.step;

            if before == Step::Root {
                prop_assert_eq!(after, Step::Root);
                prop_assert_eq!(response.text.as_str(), texts::ALREADY_AT_ROOT);
            } else {
                prop_assert_ne!(&after, &before);
                prop_assert_eq!(after, before.parent());
            }
            Ok(())
        })?;
    }

    // The back affordance is offered exactly at non-root steps
    #[test]
    fn prop_back_offered_off_root(events in proptest::collection::vec(arb_event(), 0..30)) {
        let rt = runtime();
        rt.block_on(async {
            let machine = machine().await;
            for event in events {
                let response = send(&machine, OPERATOR, event).await;
                let step = machine.sessions().get(OPERATOR).await.step;
                let has_back = response.menu.contains(MenuChoice::Back.label());
                match (&step, &response.menu) {
                    (Step::ConfirmDelete(pending), menu) => {
                        prop_assert_eq!(menu, &Menu::Confirm(pending.token.clone()))
                    }
                    (Step::Root, _) => prop_assert!(!has_back),
                    _ => prop_assert!(has_back, "no back at {}", step),
                }
            }
            Ok(())
        })?;
    }

    // Buttons of an earlier confirmation never change the step or the content
    #[test]
    fn prop_stale_confirmation_is_inert(
        events in proptest::collection::vec(arb_event(), 0..30),
        choice in arb_choice(),
    ) {
        let rt = runtime();
        rt.block_on(async {
            let machine = machine().await;
            for event in events {
                send(&machine, OPERATOR, event).await;
            }

            let before = machine.sessions().get(OPERATOR).await.step;
            let overview = machine.content.overview().await.unwrap();
            let response = send(&machine, OPERATOR, Event::StaleConfirm(choice)).await;

            prop_assert_eq!(response.text.as_str(), texts::UNSUPPORTED_ACTION);
            prop_assert_eq!(machine.sessions().get(OPERATOR).await.step, before);
            prop_assert_eq!(machine.content.overview().await.unwrap(), overview);
            Ok(())
        })?;
    }

    // Category menus are sorted whatever the insertion order
    #[test]
    fn prop_root_menu_sorted(names in proptest::collection::btree_set("[a-z]{1,8}", 1..8)) {
        let rt = runtime();
        rt.block_on(async {
            let content = MemoryContentStore::new();
            for name in names.iter().rev() {
                let _ = content.add_category(name).await.unwrap();
                let _ = content.add_question(name, "q", "a").await.unwrap();
            }
            let storage = Arc::new(MemoryOperatorStorage::new(vec![OPERATOR]));
            let machine = ConversationMachine::new(
                Arc::new(content),
                Arc::new(OperatorRegistry::load(storage).await.unwrap()),
                Arc::new(SessionStore::new(Duration::from_secs(3600))),
            );

            let response = machine.start(VISITOR).await.unwrap();
            let expected: Vec<String> = names.iter().cloned().collect();
            prop_assert_eq!(response.menu.labels().to_vec(), expected);
            Ok(())
        })?;
    }
}
