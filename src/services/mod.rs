//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod messenger;
pub mod moderation;
pub mod session;
pub mod submission;

// Re-export commonly used services
pub use auth::AuthService;
pub use messenger::{Messenger, TelegramMessenger};
pub use moderation::{ModerationOutcome, ModerationService};
pub use session::SessionService;
pub use submission::SubmissionService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::i18n::{I18n, MenuResolver};
use crate::models::Language;
use crate::state::StateStorage;
use crate::store::ForumStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub session_service: SessionService,
    pub submission_service: SubmissionService,
    pub moderation_service: ModerationService,
    pub i18n: Arc<I18n>,
    pub menu: Arc<MenuResolver>,
    pub messenger: Arc<dyn Messenger>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: &Settings,
        store: Arc<dyn ForumStore>,
        storage: StateStorage,
        messenger: Arc<dyn Messenger>,
        i18n: Arc<I18n>,
    ) -> Result<Self> {
        let default_language: Language = settings.i18n.default_language.parse()?;
        let menu = Arc::new(MenuResolver::new(&i18n));

        let auth_service = AuthService::new(settings);
        let session_service = SessionService::new(store.clone(), default_language);
        let submission_service = SubmissionService::new(
            storage,
            store.clone(),
            messenger.clone(),
            session_service.clone(),
            i18n.clone(),
            menu.clone(),
            settings.forum.max_images,
        );
        let moderation_service = ModerationService::new(
            store,
            messenger.clone(),
            auth_service.clone(),
            session_service.clone(),
            i18n.clone(),
        );

        Ok(Self {
            auth_service,
            session_service,
            submission_service,
            moderation_service,
            i18n,
            menu,
            messenger,
        })
    }
}
