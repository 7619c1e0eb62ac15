//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod start;
pub mod help;
pub mod admin;

use teloxide::{types::Message, utils::command::BotCommands};
use tracing::debug;
use crate::utils::errors::{PolskiBuddyError, Result};
use crate::services::ServiceFactory;
use crate::state::SubmissionInput;
use super::router::{InboundEvent, Router};

/// All available bot commands
#[derive(BotCommands, Debug, Clone, Copy, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "PolskiBuddy commands:")]
pub enum Command {
    #[command(description = "Start the bot and choose a language")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Finish the post you are writing")]
    Done,
    #[command(description = "Abandon the post you are writing")]
    Cancel,
    #[command(description = "Admin panel (admin only)")]
    Admin,
}

/// Teloxide endpoint for commands
pub async fn handle_command(msg: Message, cmd: Command, router: Router) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        PolskiBuddyError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;

    debug!(user_id = user_id, command = ?cmd, "Processing command");
    router.dispatch(InboundEvent::command(user_id, cmd)).await?;
    Ok(())
}

/// Main command dispatcher
pub async fn run(services: &ServiceFactory, user_id: i64, cmd: Command) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(services, user_id).await,
        Command::Help => help::handle_help(services, user_id).await,
        Command::Done => {
            services
                .submission_service
                .handle_input(user_id, SubmissionInput::Finish)
                .await?;
            Ok(())
        }
        Command::Cancel => {
            services
                .submission_service
                .handle_input(user_id, SubmissionInput::Cancel)
                .await?;
            Ok(())
        }
        Command::Admin => admin::handle_admin_panel(services, user_id).await,
    }
}
