//! Help command handler

use teloxide::utils::command::BotCommands;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use super::Command;

/// Handle /help command
pub async fn handle_help(services: &ServiceFactory, user_id: i64) -> Result<()> {
    let lang = services.session_service.language_for(user_id).await?;
    let help_text = format!(
        "{}\n\n{}",
        services.i18n.t("messages.help_title", lang, None),
        Command::descriptions()
    );

    services.messenger.send_text(user_id, &help_text, None).await?;
    Ok(())
}
