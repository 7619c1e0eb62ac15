//! PolskiBuddy Telegram Bot
//!
//! Main application entry point

use std::path::Path;
use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use polski_buddy::{
    config::Settings,
    utils::logging,
    services::{Messenger, ServiceFactory, TelegramMessenger},
    state::StateStorage,
    store::{ForumStore, MemoryForumStore},
    i18n::I18n,
    middleware::LoggingMiddleware,
    handlers::{
        Command, Router,
        handle_callback_query, handle_command, handle_message,
    },
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on shutdown
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", polski_buddy::info());

    // Initialize i18n system
    info!("Loading translations...");
    let translations_dir = Path::new(&settings.i18n.translations_dir);
    let i18n = if translations_dir.is_dir() {
        let mut i18n = I18n::new(&settings.i18n)?;
        i18n.load_translations(translations_dir).await?;
        i18n
    } else {
        warn!(
            dir = %translations_dir.display(),
            "Translations directory not found, using bundled translations"
        );
        I18n::bundled(&settings.i18n)?
    };
    let stats = i18n.get_stats();
    info!(languages = stats.languages.len(), keys = stats.total_keys, "Translations loaded");

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize services
    info!("Initializing services...");
    let store: Arc<dyn ForumStore> = Arc::new(MemoryForumStore::new());
    let messenger: Arc<dyn Messenger> = Arc::new(TelegramMessenger::new(bot.clone()));
    let services = ServiceFactory::new(
        &settings,
        store,
        StateStorage::new(),
        messenger,
        Arc::new(i18n),
    )?;
    let router = Router::new(services);
    let middleware = LoggingMiddleware::default();

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    // Create dispatcher with dependencies registered
    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![router, middleware])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build();

    info!(admin_id = settings.bot.admin_id, "PolskiBuddy bot is ready, starting polling");
    dispatcher.dispatch().await;

    info!("PolskiBuddy bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .inspect(|upd: Update, middleware: LoggingMiddleware| middleware.log_update(&upd))
        .branch(
            Update::filter_message()
                .branch(
                    // Handle commands
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(
                    // Handle text, photos and everything else
                    dptree::endpoint(handle_messages),
                ),
        )
        .branch(
            // Handle callback queries
            Update::filter_callback_query().endpoint(handle_callbacks),
        )
}

/// Handle bot commands
async fn handle_commands(
    msg: Message,
    cmd: Command,
    router: Router,
    middleware: LoggingMiddleware,
) -> HandlerResult {
    let user_id = msg.from.as_ref().map(|user| user.id.0 as i64);
    let tracker = middleware.track("command");

    let result = handle_command(msg, cmd, router).await;
    if let Some(tracker) = tracker {
        tracker.complete(result.is_ok());
    }
    if let Err(e) = result {
        middleware.log_error(&e, "command", user_id);
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    msg: Message,
    router: Router,
    middleware: LoggingMiddleware,
) -> HandlerResult {
    let user_id = msg.from.as_ref().map(|user| user.id.0 as i64);
    let tracker = middleware.track("message");

    let result = handle_message(msg, router).await;
    if let Some(tracker) = tracker {
        tracker.complete(result.is_ok());
    }
    if let Err(e) = result {
        middleware.log_error(&e, "message", user_id);
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(
    bot: Bot,
    query: CallbackQuery,
    router: Router,
    middleware: LoggingMiddleware,
) -> HandlerResult {
    let user_id = query.from.id.0 as i64;
    let tracker = middleware.track("callback");

    let result = handle_callback_query(bot, query, router).await;
    if let Some(tracker) = tracker {
        tracker.complete(result.is_ok());
    }
    if let Err(e) = result {
        middleware.log_error(&e, "callback", Some(user_id));
        return Err(e.into());
    }

    Ok(())
}
