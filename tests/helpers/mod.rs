//! Test helpers module
//!
//! This module provides utilities and helpers for testing the PolskiBuddy
//! application: a recording messenger, a mock Telegram API and a test context
//! wiring the router over the in-memory store.

#![allow(dead_code)]

pub mod recording_messenger;
pub mod telegram_mock;
pub mod test_context;

pub use recording_messenger::*;
pub use telegram_mock::*;
pub use test_context::*;
