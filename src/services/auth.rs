//! Authentication service implementation
//!
//! The bot has exactly one privileged user: the configured admin. Every
//! moderation entry point goes through [`AuthService::require_admin`].

use tracing::{debug, warn};
use crate::config::settings::Settings;
use crate::utils::errors::{PolskiBuddyError, Result};

/// Authorization checks against the configured admin
#[derive(Debug, Clone)]
pub struct AuthService {
    admin_id: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(settings: &Settings) -> Self {
        Self::with_admin(settings.bot.admin_id)
    }

    pub fn with_admin(admin_id: i64) -> Self {
        Self { admin_id }
    }

    /// Check if user is the bot admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        user_id == self.admin_id
    }

    /// Fail with `PermissionDenied` unless the user is the admin
    pub fn require_admin(&self, user_id: i64, action: &str) -> Result<()> {
        if self.is_admin(user_id) {
            debug!(user_id = user_id, action = action, "Admin authentication successful");
            Ok(())
        } else {
            warn!(user_id = user_id, action = action, "Unauthorized admin access attempt");
            Err(PolskiBuddyError::PermissionDenied(format!(
                "{} requires admin privileges",
                action
            )))
        }
    }
}
