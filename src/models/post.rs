//! Forum post model

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Stable identifier assigned to a post when it enters the pending queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque platform-issued image token (a Telegram `file_id`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub submitter_id: i64,
    pub text: String,
    pub images: Vec<ImageRef>,
    pub submitted_at: DateTime<Utc>,
}

/// A completed draft, before the store assigns it an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub submitter_id: i64,
    pub text: String,
    pub images: Vec<ImageRef>,
}

impl Post {
    pub fn from_new(id: PostId, new_post: NewPost) -> Self {
        Self {
            id,
            submitter_id: new_post.submitter_id,
            text: new_post.text,
            images: new_post.images,
            submitted_at: Utc::now(),
        }
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}
