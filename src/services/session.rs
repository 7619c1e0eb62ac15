//! Session language service
//!
//! Remembers which language each user picked on the chooser and answers the
//! "which language do I talk to this user in" question for every handler.

use std::sync::Arc;
use tracing::debug;
use crate::models::Language;
use crate::store::ForumStore;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn ForumStore>,
    default_language: Language,
}

impl SessionService {
    pub fn new(store: Arc<dyn ForumStore>, default_language: Language) -> Self {
        Self {
            store,
            default_language,
        }
    }

    /// Language for a user, the default one until they pick
    pub async fn language_for(&self, user_id: i64) -> Result<Language> {
        Ok(self
            .store
            .language(user_id)
            .await?
            .unwrap_or(self.default_language))
    }

    pub async fn set_language(&self, user_id: i64, language: Language) -> Result<()> {
        debug!(user_id = user_id, language = %language, "Storing language preference");
        self.store.set_language(user_id, language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryForumStore;

    #[tokio::test]
    async fn test_default_until_chosen() {
        let sessions = SessionService::new(Arc::new(MemoryForumStore::new()), Language::Ru);
        assert_eq!(sessions.language_for(1).await.unwrap(), Language::Ru);

        sessions.set_language(1, Language::Pl).await.unwrap();
        assert_eq!(sessions.language_for(1).await.unwrap(), Language::Pl);
        assert_eq!(sessions.language_for(2).await.unwrap(), Language::Ru);
    }
}
