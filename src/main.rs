//! FaqBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn, error};

use FaqBuddy::{
    config::Settings,
    utils::logging,
    services::ServiceFactory,
    state::{SessionStore, SessionStoreManager},
    dialogue::ConversationMachine,
    handlers::{handle_callback_query, handle_command, handle_message, Command},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", FaqBuddy::info());

    let services = ServiceFactory::from_settings(&settings).await?;
    let health = services.health_check().await;
    for issue in health.get_issues() {
        warn!(issue = %issue, "Service health issue");
    }

    // Initialize session management
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        settings.sessions.idle_timeout_seconds,
    )));
    let mut session_manager = SessionStoreManager::new(
        sessions.clone(),
        Duration::from_secs(settings.sessions.cleanup_interval_seconds),
    );
    session_manager.start_cleanup();
    info!(idle_timeout = ?sessions.idle_timeout(), "Session store ready");

    let machine = Arc::new(ConversationMachine::new(
        services.content.clone(),
        services.operators.clone(),
        sessions,
    ));

    let bot = Bot::new(&settings.bot.token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![machine])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build();

    info!("FaqBuddy bot is ready, starting polling...");
    dispatcher.dispatch().await;

    session_manager.stop_cleanup();
    info!("FaqBuddy bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    machine: Arc<ConversationMachine>,
) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd, machine).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, machine: Arc<ConversationMachine>) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, machine).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, machine: Arc<ConversationMachine>) -> HandlerResult {
    if let Err(e) = handle_callback_query(bot, query, machine).await {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Error handling callback query");
        return Err(e.into());
    }

    Ok(())
}
