//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod language;
pub mod markup;
pub mod post;

// Re-export commonly used models
pub use language::Language;
pub use markup::{Control, Markup};
pub use post::{Post, NewPost, PostId, ImageRef};
