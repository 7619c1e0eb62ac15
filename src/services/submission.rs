//! Post submission service
//!
//! Drives the per-user [`SubmissionContext`] state machine, answers the user
//! after every step and hands completed drafts to the forum store.

use std::sync::Arc;
use tracing::{debug, info};
use crate::i18n::{I18n, MenuResolver};
use crate::models::Language;
use crate::state::{StateStorage, SubmissionInput, SubmissionOutcome};
use crate::store::ForumStore;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use super::messenger::Messenger;
use super::session::SessionService;

#[derive(Clone)]
pub struct SubmissionService {
    storage: StateStorage,
    store: Arc<dyn ForumStore>,
    messenger: Arc<dyn Messenger>,
    sessions: SessionService,
    i18n: Arc<I18n>,
    menu: Arc<MenuResolver>,
    max_images: usize,
}

impl SubmissionService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        storage: StateStorage,
        store: Arc<dyn ForumStore>,
        messenger: Arc<dyn Messenger>,
        sessions: SessionService,
        i18n: Arc<I18n>,
        menu: Arc<MenuResolver>,
        max_images: usize,
    ) -> Self {
        Self {
            storage,
            store,
            messenger,
            sessions,
            i18n,
            menu,
            max_images,
        }
    }

    /// Whether the user is in the middle of a submission
    pub async fn is_active(&self, user_id: i64) -> bool {
        self.storage.is_active(user_id).await
    }

    /// Start a new submission and ask for the post text
    pub async fn begin(&self, user_id: i64) -> Result<SubmissionOutcome> {
        let mut context = self.storage.load_or_new(user_id).await;
        let outcome = context.begin();
        self.storage.save_context(&context).await;

        if outcome == SubmissionOutcome::Started {
            log_user_action(user_id, "submission_started", context.draft_id.as_deref());
            let lang = self.sessions.language_for(user_id).await?;
            self.reply(user_id, lang, &outcome).await?;
        }

        Ok(outcome)
    }

    /// Feed one input to the user's submission
    pub async fn handle_input(&self, user_id: i64, input: SubmissionInput) -> Result<SubmissionOutcome> {
        let mut context = self.storage.load_or_new(user_id).await;
        let draft_id = context.draft_id.clone();
        let outcome = context.apply(input, self.max_images);

        debug!(
            user_id = user_id,
            draft_id = ?draft_id,
            step = context.step.as_str(),
            outcome = ?outcome,
            "Submission input handled"
        );

        // Commit before clearing the stored draft so a failed store keeps it
        if let SubmissionOutcome::Completed(post) = &outcome {
            let post = self.store.submit(post.clone()).await?;
            info!(
                user_id = user_id,
                post_id = %post.id,
                images = post.images.len(),
                draft_id = ?draft_id,
                "Post submitted for moderation"
            );
        }
        if outcome == SubmissionOutcome::Cancelled {
            log_user_action(user_id, "submission_cancelled", draft_id.as_deref());
        }

        self.storage.save_context(&context).await;

        let lang = self.sessions.language_for(user_id).await?;
        self.reply(user_id, lang, &outcome).await?;
        Ok(outcome)
    }

    async fn reply(&self, user_id: i64, lang: Language, outcome: &SubmissionOutcome) -> Result<()> {
        let text = match outcome {
            SubmissionOutcome::Started => self.i18n.t("submission.enter_text", lang, None),
            SubmissionOutcome::TextAccepted => {
                self.i18n.t_with("submission.send_images", lang, "limit", self.max_images)
            }
            SubmissionOutcome::TextRequired => self.i18n.t("submission.text_required", lang, None),
            SubmissionOutcome::ImageAccepted { count } => {
                self.i18n.t_with("submission.image_accepted", lang, "count", count)
            }
            SubmissionOutcome::ImageLimitReached { limit } => {
                self.i18n.t_with("submission.image_limit", lang, "limit", limit)
            }
            SubmissionOutcome::EmptyDraft => self.i18n.t("submission.empty_draft", lang, None),
            SubmissionOutcome::Completed(_) => self.i18n.t("submission.submitted", lang, None),
            SubmissionOutcome::Cancelled => self.i18n.t("submission.cancelled", lang, None),
            SubmissionOutcome::NoActiveDraft => self.i18n.t("submission.no_active_draft", lang, None),
            SubmissionOutcome::Ignored => return Ok(()),
        };
        self.messenger.send_text(user_id, &text, None).await?;

        // Back to the main menu once the flow is over
        if matches!(outcome, SubmissionOutcome::Completed(_) | SubmissionOutcome::Cancelled) {
            let title = self.i18n.t("menu.title", lang, None);
            self.messenger
                .send_text(user_id, &title, Some(self.menu.main_menu(lang)))
                .await?;
        }

        Ok(())
    }
}
