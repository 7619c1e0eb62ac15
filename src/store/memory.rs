//! In-memory forum store
//!
//! Everything lives for the lifetime of the process. A single mutex guards all
//! state so queue mutations from concurrently running handlers are serialized.

use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use super::{ForumStats, ForumStore};
use crate::models::{Language, NewPost, Post, PostId};
use crate::utils::errors::Result;

#[derive(Debug, Default)]
struct ForumState {
    sessions: HashMap<i64, Language>,
    pending: Vec<Post>,
    published: Vec<Post>,
    next_id: u64,
}

impl ForumState {
    fn take_pending(&mut self, id: PostId) -> Option<Post> {
        let position = self.pending.iter().position(|post| post.id == id)?;
        Some(self.pending.remove(position))
    }
}

/// Process-lifetime store backed by plain collections
#[derive(Debug, Default)]
pub struct MemoryForumStore {
    state: Mutex<ForumState>,
}

impl MemoryForumStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ForumStore for MemoryForumStore {
    async fn set_language(&self, user_id: i64, language: Language) -> Result<()> {
        let mut state = self.state.lock().await;
        state.sessions.insert(user_id, language);
        Ok(())
    }

    async fn language(&self, user_id: i64) -> Result<Option<Language>> {
        let state = self.state.lock().await;
        Ok(state.sessions.get(&user_id).copied())
    }

    async fn submit(&self, post: NewPost) -> Result<Post> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let post = Post::from_new(PostId(state.next_id), post);
        state.pending.push(post.clone());
        debug!(post_id = %post.id, pending = state.pending.len(), "Post queued for moderation");
        Ok(post)
    }

    async fn pending(&self) -> Result<Vec<Post>> {
        Ok(self.state.lock().await.pending.clone())
    }

    async fn published(&self) -> Result<Vec<Post>> {
        Ok(self.state.lock().await.published.clone())
    }

    async fn approve(&self, id: PostId) -> Result<Option<Post>> {
        let mut state = self.state.lock().await;
        let Some(post) = state.take_pending(id) else {
            return Ok(None);
        };
        state.published.push(post.clone());
        Ok(Some(post))
    }

    async fn reject(&self, id: PostId) -> Result<Option<Post>> {
        let mut state = self.state.lock().await;
        Ok(state.take_pending(id))
    }

    async fn stats(&self) -> Result<ForumStats> {
        let state = self.state.lock().await;
        Ok(ForumStats {
            pending: state.pending.len(),
            published: state.published.len(),
            sessions: state.sessions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageRef;

    fn new_post(submitter_id: i64, text: &str) -> NewPost {
        NewPost {
            submitter_id,
            text: text.to_string(),
            images: vec![ImageRef::new("img1")],
        }
    }

    #[tokio::test]
    async fn test_submit_assigns_increasing_ids() {
        let store = MemoryForumStore::new();
        let first = store.submit(new_post(1, "first")).await.unwrap();
        let second = store.submit(new_post(2, "second")).await.unwrap();

        assert!(second.id > first.id);
        let pending = store.pending().await.unwrap();
        assert_eq!(pending.iter().map(|p| p.text.as_str()).collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_approve_moves_post_once() {
        let store = MemoryForumStore::new();
        let post = store.submit(new_post(1, "hello")).await.unwrap();

        let approved = store.approve(post.id).await.unwrap();
        assert_eq!(approved.as_ref().map(|p| p.id), Some(post.id));
        assert!(store.pending().await.unwrap().is_empty());
        assert_eq!(store.published().await.unwrap(), vec![post.clone()]);

        // second approval of the same id is a no-op
        assert!(store.approve(post.id).await.unwrap().is_none());
        assert_eq!(store.published().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reject_discards_post() {
        let store = MemoryForumStore::new();
        let post = store.submit(new_post(1, "spam")).await.unwrap();

        assert!(store.reject(post.id).await.unwrap().is_some());
        assert!(store.pending().await.unwrap().is_empty());
        assert!(store.published().await.unwrap().is_empty());
        assert!(store.reject(post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_removal_keeps_other_ids_valid() {
        let store = MemoryForumStore::new();
        let first = store.submit(new_post(1, "a")).await.unwrap();
        let second = store.submit(new_post(2, "b")).await.unwrap();
        let third = store.submit(new_post(3, "c")).await.unwrap();

        store.reject(first.id).await.unwrap();
        let approved = store.approve(third.id).await.unwrap().expect("third is still pending");
        assert_eq!(approved.text, "c");
        assert_eq!(store.pending().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn test_sessions_overwrite_and_stats() {
        let store = MemoryForumStore::new();
        assert_eq!(store.language(10).await.unwrap(), None);

        store.set_language(10, Language::Pl).await.unwrap();
        store.set_language(10, Language::Ru).await.unwrap();
        assert_eq!(store.language(10).await.unwrap(), Some(Language::Ru));

        store.submit(new_post(10, "x")).await.unwrap();
        let stats = store.stats().await.unwrap();
        assert_eq!(stats, ForumStats { pending: 1, published: 0, sessions: 1 });
    }
}
