//! Admin command handlers
//!
//! The /admin panel and the review shortcut behind its button. Both refuse
//! non-admins with `PermissionDenied`, which the router turns into a reply.

use tracing::info;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;

/// Handle /admin command
pub async fn handle_admin_panel(services: &ServiceFactory, user_id: i64) -> Result<()> {
    let stats = services.moderation_service.panel(user_id).await?;
    info!(user_id = user_id, pending = stats.pending, "Admin panel accessed");
    Ok(())
}

/// Send the pending queue to the admin for review
pub async fn handle_review_pending(services: &ServiceFactory, user_id: i64) -> Result<()> {
    let count = services.moderation_service.list_pending(user_id).await?;
    info!(user_id = user_id, count = count, "Pending posts sent for review");
    Ok(())
}
