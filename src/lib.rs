//! PolskiBuddy Telegram Bot
//!
//! A community bot for Russian speakers learning Polish: a localized menu,
//! a small forum where members propose text and image posts, and an admin
//! moderation workflow for those posts.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod store;
pub mod state;
pub mod i18n;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PolskiBuddyError, Result};

// Re-export main components for easy access
pub use handlers::Router;
pub use services::ServiceFactory;
pub use state::StateStorage;
pub use store::{ForumStore, MemoryForumStore};
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
