//! State storage implementation
//!
//! This module keeps per-user submission contexts for the lifetime of the
//! process. Only active contexts are stored; finishing or cancelling a
//! submission removes the entry.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use super::submission::SubmissionContext;

/// In-memory submission context storage
#[derive(Clone, Default)]
pub struct StateStorage {
    contexts: Arc<RwLock<HashMap<i64, SubmissionContext>>>,
}

impl StateStorage {
    /// Create a new state storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a submission context, dropping it when the user is back to idle
    pub async fn save_context(&self, context: &SubmissionContext) {
        let mut contexts = self.contexts.write().await;
        if context.is_active() {
            debug!(user_id = context.user_id, step = context.step.as_str(), "Saving submission context");
            contexts.insert(context.user_id, context.clone());
        } else {
            debug!(user_id = context.user_id, "Clearing submission context");
            contexts.remove(&context.user_id);
        }
    }

    /// Load the active submission context for a user
    pub async fn load_context(&self, user_id: i64) -> Option<SubmissionContext> {
        self.contexts.read().await.get(&user_id).cloned()
    }

    /// Load the user's context or a fresh idle one
    pub async fn load_or_new(&self, user_id: i64) -> SubmissionContext {
        self.load_context(user_id)
            .await
            .unwrap_or_else(|| SubmissionContext::new(user_id))
    }

    /// Check whether the user is in the middle of a submission
    pub async fn is_active(&self, user_id: i64) -> bool {
        self.contexts.read().await.contains_key(&user_id)
    }
}
