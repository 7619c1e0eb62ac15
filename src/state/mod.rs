//! State management module
//!
//! This module handles the per-user post submission flow and its storage

pub mod storage;
pub mod submission;

// Re-export commonly used state components
pub use storage::StateStorage;
pub use submission::{Draft, SubmissionContext, SubmissionInput, SubmissionOutcome, SubmissionStep};
