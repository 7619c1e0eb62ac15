//! Moderation service
//!
//! Admin review of the pending queue and the public listing of published
//! posts. Decisions are committed in the store first; every message sent
//! afterwards is best effort and never undoes a decision.

use std::sync::Arc;
use tracing::{debug, info};
use crate::i18n::I18n;
use crate::models::{Control, Markup, Post, PostId};
use crate::store::{ForumStats, ForumStore};
use crate::utils::errors::Result;
use crate::utils::helpers::{callback_data, truncate_text};
use crate::utils::logging::{log_admin_action, log_delivery_failure};
use super::auth::AuthService;
use super::messenger::Messenger;
use super::session::SessionService;

/// Callback action tags of the review buttons
pub const APPROVE_ACTION: &str = "approve";
pub const REJECT_ACTION: &str = "reject";
pub const ADMIN_PENDING_ACTION: &str = "admin:pending";

const LOG_PREVIEW_CHARS: usize = 40;

/// Result of an approve or reject decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationOutcome {
    Approved(Post),
    Rejected(Post),
    /// The id was not pending, nothing changed
    NotFound,
}

#[derive(Clone)]
pub struct ModerationService {
    store: Arc<dyn ForumStore>,
    messenger: Arc<dyn Messenger>,
    auth: AuthService,
    sessions: SessionService,
    i18n: Arc<I18n>,
}

impl ModerationService {
    pub fn new(
        store: Arc<dyn ForumStore>,
        messenger: Arc<dyn Messenger>,
        auth: AuthService,
        sessions: SessionService,
        i18n: Arc<I18n>,
    ) -> Self {
        Self {
            store,
            messenger,
            auth,
            sessions,
            i18n,
        }
    }

    /// Send every pending post with approve/reject controls to the admin
    ///
    /// Returns the number of posts sent. Non-admins get `PermissionDenied`
    /// before anything is read from the queue.
    pub async fn list_pending(&self, caller_id: i64) -> Result<usize> {
        self.auth.require_admin(caller_id, "list_pending")?;
        let lang = self.sessions.language_for(caller_id).await?;

        let pending = self.store.pending().await?;
        if pending.is_empty() {
            let text = self.i18n.t("moderation.no_pending", lang, None);
            self.messenger.send_text(caller_id, &text, None).await?;
            return Ok(0);
        }

        debug!(caller_id = caller_id, count = pending.len(), "Listing pending posts");
        let approve_label = self.i18n.t("moderation.approve", lang, None);
        let reject_label = self.i18n.t("moderation.reject", lang, None);

        for post in &pending {
            let controls = Markup::Inline(vec![vec![
                Control::new(approve_label.clone(), callback_data(APPROVE_ACTION, post.id)),
                Control::new(reject_label.clone(), callback_data(REJECT_ACTION, post.id)),
            ]]);
            self.send_post(caller_id, post, Some(controls)).await?;
        }

        Ok(pending.len())
    }

    /// Send every published post to the requester, oldest first
    pub async fn list_published(&self, requester_id: i64) -> Result<usize> {
        let lang = self.sessions.language_for(requester_id).await?;

        let published = self.store.published().await?;
        if published.is_empty() {
            let text = self.i18n.t("forum.no_posts", lang, None);
            self.messenger.send_text(requester_id, &text, None).await?;
            return Ok(0);
        }

        for post in &published {
            self.send_post(requester_id, post, None).await?;
        }

        Ok(published.len())
    }

    pub async fn approve(&self, caller_id: i64, post_id: PostId) -> Result<ModerationOutcome> {
        self.auth.require_admin(caller_id, "approve")?;

        let Some(post) = self.store.approve(post_id).await? else {
            debug!(caller_id = caller_id, post_id = %post_id, "Approve of a post that is not pending");
            return Ok(ModerationOutcome::NotFound);
        };

        let preview = truncate_text(&post.text, LOG_PREVIEW_CHARS);
        log_admin_action(caller_id, "approve_post", Some(&post_id.to_string()), Some(&preview));

        let lang = self.sessions.language_for(caller_id).await?;
        if let Err(e) = self.messenger.send_image_set(caller_id, &post.images).await {
            log_delivery_failure(caller_id, "approve_confirmation", &e.to_string());
        }
        let confirmation = self.i18n.t("moderation.approved_post", lang, None);
        self.deliver(caller_id, &confirmation, "approve_confirmation").await;

        self.notify_submitter(&post, "moderation.your_post_approved").await;
        Ok(ModerationOutcome::Approved(post))
    }

    pub async fn reject(&self, caller_id: i64, post_id: PostId) -> Result<ModerationOutcome> {
        self.auth.require_admin(caller_id, "reject")?;

        let Some(post) = self.store.reject(post_id).await? else {
            debug!(caller_id = caller_id, post_id = %post_id, "Reject of a post that is not pending");
            return Ok(ModerationOutcome::NotFound);
        };

        let preview = truncate_text(&post.text, LOG_PREVIEW_CHARS);
        log_admin_action(caller_id, "reject_post", Some(&post_id.to_string()), Some(&preview));

        let lang = self.sessions.language_for(caller_id).await?;
        let confirmation = self.i18n.t("moderation.rejected_post", lang, None);
        self.deliver(caller_id, &confirmation, "reject_confirmation").await;

        self.notify_submitter(&post, "moderation.your_post_rejected").await;
        Ok(ModerationOutcome::Rejected(post))
    }

    /// Admin panel with queue counters and a shortcut to the review list
    pub async fn panel(&self, caller_id: i64) -> Result<ForumStats> {
        self.auth.require_admin(caller_id, "admin_panel")?;
        let lang = self.sessions.language_for(caller_id).await?;
        let stats = self.store.stats().await?;

        let text = format!(
            "{}\n\n{}\n{}",
            self.i18n.t("admin.panel_title", lang, None),
            self.i18n.tp("admin.pending_count", lang, stats.pending as i64, None),
            self.i18n.tp("admin.published_count", lang, stats.published as i64, None),
        );
        let controls = Markup::Inline(vec![vec![Control::new(
            self.i18n.t("admin.review_pending", lang, None),
            ADMIN_PENDING_ACTION,
        )]]);
        self.messenger.send_text(caller_id, &text, Some(controls)).await?;

        info!(
            admin_id = caller_id,
            pending = stats.pending,
            published = stats.published,
            "Admin panel shown"
        );
        Ok(stats)
    }

    async fn send_post(&self, recipient_id: i64, post: &Post, markup: Option<Markup>) -> Result<()> {
        if post.has_images() {
            self.messenger.send_image_set(recipient_id, &post.images).await?;
        }
        self.messenger.send_text(recipient_id, &post.text, markup).await
    }

    async fn notify_submitter(&self, post: &Post, key: &str) {
        let lang = match self.sessions.language_for(post.submitter_id).await {
            Ok(lang) => lang,
            Err(e) => {
                log_delivery_failure(post.submitter_id, "submitter_notification", &e.to_string());
                return;
            }
        };
        let text = self.i18n.t(key, lang, None);
        self.deliver(post.submitter_id, &text, "submitter_notification").await;
    }

    async fn deliver(&self, recipient_id: i64, text: &str, purpose: &str) {
        if let Err(e) = self.messenger.send_text(recipient_id, text, None).await {
            log_delivery_failure(recipient_id, purpose, &e.to_string());
        }
    }
}
