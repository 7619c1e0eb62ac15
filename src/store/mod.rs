//! Forum storage layer
//!
//! The bot keeps three pieces of shared state: the language each user picked,
//! the queue of posts awaiting moderation and the queue of published posts.
//! Handlers only see the [`ForumStore`] trait so a durable backend can replace
//! the in-memory one without touching them.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use crate::models::{Language, NewPost, Post, PostId};
use crate::utils::errors::Result;

pub use memory::MemoryForumStore;

/// Storage interface for sessions and moderation queues
///
/// Implementations must make `approve` and `reject` atomic: the check that a
/// post is still pending and its removal happen under one critical section.
#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Remember the language a user picked
    async fn set_language(&self, user_id: i64, language: Language) -> Result<()>;

    /// Language a user picked, if any
    async fn language(&self, user_id: i64) -> Result<Option<Language>>;

    /// Append a post to the pending queue and assign its id
    async fn submit(&self, post: NewPost) -> Result<Post>;

    /// Snapshot of the pending queue in submission order
    async fn pending(&self) -> Result<Vec<Post>>;

    /// Snapshot of the published queue in approval order
    async fn published(&self) -> Result<Vec<Post>>;

    /// Move a pending post to the published queue
    ///
    /// Returns `None` when the id is not pending (already handled or unknown).
    async fn approve(&self, id: PostId) -> Result<Option<Post>>;

    /// Drop a pending post
    ///
    /// Returns `None` when the id is not pending (already handled or unknown).
    async fn reject(&self, id: PostId) -> Result<Option<Post>>;

    /// Queue sizes
    async fn stats(&self) -> Result<ForumStats>;
}

/// Queue and session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ForumStats {
    pub pending: usize,
    pub published: usize,
    pub sessions: usize,
}
