//! Command dispatch: one parsed command, one API call, one rendered result.

use std::io::Write;

use crate::commands::{CrispCommand, help_text};
use crate::error::Result;
use crate::render::ConsoleRenderer;
use crate::types::{ConversationState, MessageParam};
use crate::website::Website;

/// Runs `command` against `website`, writing the result through `renderer`.
///
/// [`CrispCommand::Help`] makes no call at all.
pub async fn run<W: Write>(
    command: &CrispCommand,
    website: &Website<'_>,
    renderer: &mut ConsoleRenderer<W>,
) -> Result<()> {
    tracing::debug!(?command, website = website.id(), "running command");
    match command {
        CrispCommand::List { filter, limit } => {
            tracing::debug!(%filter, limit, "listing conversations");
            let conversations = website.conversations(*filter, *limit).await?;
            renderer.conversations(&conversations)?;
        }
        CrispCommand::Read { session_id } => {
            let mut messages = website.messages(session_id).await?;
            // The API returns newest first.
            messages.reverse();
            renderer.messages(session_id, &messages)?;
        }
        CrispCommand::Reply {
            session_id,
            message,
        } => {
            website
                .send_message(session_id, &MessageParam::operator_text(message.as_str()))
                .await?;
            renderer.message_sent(session_id)?;
        }
        CrispCommand::Resolve { session_id } => {
            website
                .update_state(session_id, ConversationState::Resolved)
                .await?;
            renderer.resolved(session_id)?;
        }
        CrispCommand::Reopen { session_id } => {
            website
                .update_state(session_id, ConversationState::Pending)
                .await?;
            renderer.reopened(session_id)?;
        }
        CrispCommand::Search { query } => {
            let conversations = website.search(query).await?;
            renderer.search_results(query, &conversations)?;
        }
        CrispCommand::Info { session_id } => {
            let conversation = website.conversation(session_id).await?;
            renderer.conversation_info(&conversation)?;
        }
        CrispCommand::Help => {
            renderer.text(&help_text())?;
        }
    }
    Ok(())
}
