//! Post submission state machine
//!
//! A user proposing a forum post walks through three steps:
//!
//! ```text
//! Idle --propose--> AwaitingText --text--> AwaitingImages --/done--> Idle
//!                                               |  ^
//!                                               +--+ image (up to the limit)
//! ```
//!
//! While a submission is active every input that is not text, an image, a
//! finish or a cancel signal is dropped so menu navigation cannot corrupt the
//! draft. The machine is pure: it never talks to the network or the store, the
//! caller acts on the returned [`SubmissionOutcome`].

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::models::{ImageRef, NewPost};
use crate::utils::helpers::{generate_uuid, is_blank};

/// Where a user is in the submission flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStep {
    Idle,
    AwaitingText,
    AwaitingImages,
}

impl SubmissionStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStep::Idle => "idle",
            SubmissionStep::AwaitingText => "awaiting_text",
            SubmissionStep::AwaitingImages => "awaiting_images",
        }
    }
}

/// Post data collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub text: Option<String>,
    pub images: Vec<ImageRef>,
}

/// Signals the state machine understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    Text(String),
    Image(ImageRef),
    Finish,
    Cancel,
    /// Anything else (stickers, documents, unknown commands)
    Other,
}

/// Result of feeding one signal to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Flow entered, text is expected next
    Started,
    /// Text stored, images are expected next
    TextAccepted,
    /// Input was not usable text; still waiting for it
    TextRequired,
    ImageAccepted { count: usize },
    ImageLimitReached { limit: usize },
    /// Finish signal with no usable text in the draft; nothing committed
    EmptyDraft,
    /// Flow finished, the post is ready to be queued
    Completed(NewPost),
    Cancelled,
    /// Finish or cancel while no submission is active
    NoActiveDraft,
    /// Signal dropped, draft and step unchanged
    Ignored,
}

/// Per-user submission state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionContext {
    pub user_id: i64,
    /// Correlates log lines of a single draft
    pub draft_id: Option<String>,
    pub step: SubmissionStep,
    pub draft: Draft,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionContext {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            draft_id: None,
            step: SubmissionStep::Idle,
            draft: Draft::default(),
            updated_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.step != SubmissionStep::Idle
    }

    /// Enter the flow. Does nothing if a submission is already running.
    pub fn begin(&mut self) -> SubmissionOutcome {
        if self.is_active() {
            return SubmissionOutcome::Ignored;
        }

        self.draft_id = Some(generate_uuid());
        self.draft = Draft::default();
        self.step = SubmissionStep::AwaitingText;
        self.touch();
        SubmissionOutcome::Started
    }

    /// Feed one signal to the state machine
    pub fn apply(&mut self, input: SubmissionInput, max_images: usize) -> SubmissionOutcome {
        match (self.step, input) {
            (SubmissionStep::Idle, SubmissionInput::Finish | SubmissionInput::Cancel) => {
                SubmissionOutcome::NoActiveDraft
            }
            (SubmissionStep::Idle, _) => SubmissionOutcome::Ignored,

            (_, SubmissionInput::Cancel) => {
                self.reset();
                SubmissionOutcome::Cancelled
            }

            (SubmissionStep::AwaitingText, SubmissionInput::Text(text)) => {
                if is_blank(&text) {
                    return SubmissionOutcome::TextRequired;
                }
                self.draft.text = Some(text.trim().to_string());
                self.draft.images.clear();
                self.step = SubmissionStep::AwaitingImages;
                self.touch();
                SubmissionOutcome::TextAccepted
            }
            (SubmissionStep::AwaitingText, SubmissionInput::Image(_) | SubmissionInput::Finish) => {
                SubmissionOutcome::TextRequired
            }
            (SubmissionStep::AwaitingText, SubmissionInput::Other) => SubmissionOutcome::Ignored,

            (SubmissionStep::AwaitingImages, SubmissionInput::Image(image)) => {
                if self.draft.images.len() >= max_images {
                    return SubmissionOutcome::ImageLimitReached { limit: max_images };
                }
                self.draft.images.push(image);
                self.touch();
                SubmissionOutcome::ImageAccepted { count: self.draft.images.len() }
            }
            (SubmissionStep::AwaitingImages, SubmissionInput::Finish) => {
                let text = match self.draft.text.as_deref() {
                    Some(text) if !is_blank(text) => text.to_string(),
                    _ => return SubmissionOutcome::EmptyDraft,
                };
                let post = NewPost {
                    submitter_id: self.user_id,
                    text,
                    images: std::mem::take(&mut self.draft.images),
                };
                self.reset();
                SubmissionOutcome::Completed(post)
            }
            (SubmissionStep::AwaitingImages, SubmissionInput::Text(_) | SubmissionInput::Other) => {
                SubmissionOutcome::Ignored
            }
        }
    }

    fn reset(&mut self) {
        self.step = SubmissionStep::Idle;
        self.draft = Draft::default();
        self.draft_id = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
