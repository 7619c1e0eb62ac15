//! Test context for unified test setup
//!
//! Wires a real [`Router`] over the in-memory store and a recording
//! messenger, so tests drive the bot exactly like the Telegram endpoints do.

use std::sync::Arc;
use polski_buddy::config::Settings;
use polski_buddy::handlers::{Command, InboundEvent, Router};
use polski_buddy::i18n::{I18n, MenuAction};
use polski_buddy::models::{Language, Post};
use polski_buddy::services::ServiceFactory;
use polski_buddy::state::StateStorage;
use polski_buddy::store::{ForumStore, MemoryForumStore};

use super::recording_messenger::RecordingMessenger;

pub const ADMIN_ID: i64 = 555666777;
pub const USER_ID: i64 = 987654321;
pub const OTHER_USER_ID: i64 = 123456789;

/// Unified test context that manages all test components
pub struct TestContext {
    pub router: Router,
    pub store: Arc<MemoryForumStore>,
    pub messenger: Arc<RecordingMessenger>,
    pub storage: StateStorage,
    pub settings: Settings,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_max_images(max_images: usize) -> Self {
        let mut settings = test_settings();
        settings.forum.max_images = max_images;
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: Settings) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let i18n = Arc::new(I18n::bundled(&settings.i18n).expect("bundled translations"));
        let store = Arc::new(MemoryForumStore::new());
        let messenger = Arc::new(RecordingMessenger::new());
        let storage = StateStorage::new();

        let services = ServiceFactory::new(
            &settings,
            store.clone(),
            storage.clone(),
            messenger.clone(),
            i18n,
        )
        .expect("services");

        Self {
            router: Router::new(services),
            store,
            messenger,
            storage,
            settings,
        }
    }

    pub fn i18n(&self) -> &I18n {
        &self.router.services().i18n
    }

    pub fn t(&self, key: &str, lang: Language) -> String {
        self.i18n().t(key, lang, None)
    }

    pub fn t_with(&self, key: &str, lang: Language, name: &str, value: impl ToString) -> String {
        self.i18n().t_with(key, lang, name, value)
    }

    /// Localized reply-keyboard label, as the client would send it back
    pub fn label(&self, lang: Language, action: MenuAction) -> String {
        self.router.services().menu.label(lang, action)
    }

    pub async fn text(&self, user_id: i64, text: &str) {
        self.router
            .dispatch(InboundEvent::text(user_id, text))
            .await
            .expect("text dispatch");
    }

    pub async fn image(&self, user_id: i64, file_id: &str) {
        self.router
            .dispatch(InboundEvent::image(user_id, file_id))
            .await
            .expect("image dispatch");
    }

    pub async fn command(&self, user_id: i64, command: Command) {
        self.router
            .dispatch(InboundEvent::command(user_id, command))
            .await
            .expect("command dispatch");
    }

    /// Press an inline button; returns the alert text, if any
    pub async fn callback(&self, user_id: i64, data: &str) -> Option<String> {
        self.router
            .dispatch(InboundEvent::callback(user_id, data))
            .await
            .expect("callback dispatch")
    }

    pub async fn choose_language(&self, user_id: i64, lang: Language) {
        let notice = self.callback(user_id, &format!("lang:{}", lang.code())).await;
        assert!(notice.is_none(), "language choice should not raise an alert");
    }

    /// Walk the menus to the "propose post" button
    pub async fn start_submission(&self, user_id: i64, lang: Language) {
        self.text(user_id, &self.label(lang, MenuAction::Forum)).await;
        self.text(user_id, &self.label(lang, MenuAction::ProposePost)).await;
    }

    /// Submit a complete post and return it as queued
    pub async fn submit_post(&self, user_id: i64, lang: Language, text: &str, images: &[&str]) -> Post {
        self.start_submission(user_id, lang).await;
        self.text(user_id, text).await;
        for image in images {
            self.image(user_id, image).await;
        }
        self.command(user_id, Command::Done).await;

        self.pending()
            .await
            .into_iter()
            .last()
            .expect("post should be pending")
    }

    pub async fn pending(&self) -> Vec<Post> {
        self.store.pending().await.expect("pending")
    }

    pub async fn published(&self) -> Vec<Post> {
        self.store.published().await.expect("published")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Create test-specific settings
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = "12345:test_token".to_string();
    settings.bot.admin_id = ADMIN_ID;
    settings.logging.level = "debug".to_string();
    settings
}
