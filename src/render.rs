//! Terminal output for every command.
//!
//! The layout is fixed: scripts and tests compare it line by line, so any
//! change here is a change to the tool's output format.

use std::io::{self, Stdout, Write};

use time::UtcOffset;

use crate::types::{Conversation, ConversationMeta, Message};
use crate::utils::time::{INVALID_DATE, format_timestamp};

/// Icon for resolved conversations.
const ICON_RESOLVED: &str = "✅";

/// Icon for conversations with unread operator messages.
const ICON_UNREAD: &str = "🔴";

/// Icon for every other conversation.
const ICON_OPEN: &str = "💬";

/// Writes command output to a sink, formatting timestamps at a fixed offset.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    offset: UtcOffset,
}

impl ConsoleRenderer<Stdout> {
    /// Renders to standard output.
    pub fn stdout(offset: UtcOffset) -> Self {
        Self::new(io::stdout(), offset)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    /// Renders to `out`, formatting timestamps at `offset`.
    pub fn new(out: W, offset: UtcOffset) -> Self {
        Self { out, offset }
    }

    /// Gives back the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// A missing time formats like an unrepresentable one.
    fn time(&self, seconds: Option<f64>) -> String {
        match seconds {
            Some(seconds) => format_timestamp(seconds, self.offset),
            None => INVALID_DATE.to_string(),
        }
    }

    /// A page of conversations.
    pub fn conversations(&mut self, conversations: &[Conversation]) -> io::Result<()> {
        if conversations.is_empty() {
            return writeln!(self.out, "No conversations found.");
        }
        writeln!(self.out, "\n📬 Conversations ({}):\n", conversations.len())?;
        for conversation in conversations {
            self.conversation_entry(conversation)?;
        }
        Ok(())
    }

    /// Search results for `query`.
    pub fn search_results(&mut self, query: &str, conversations: &[Conversation]) -> io::Result<()> {
        if conversations.is_empty() {
            return writeln!(self.out, "No results for \"{query}\"");
        }
        writeln!(
            self.out,
            "\n🔍 Search results for \"{query}\" ({}):\n",
            conversations.len()
        )?;
        for conversation in conversations {
            self.conversation_entry(conversation)?;
        }
        Ok(())
    }

    fn conversation_entry(&mut self, conversation: &Conversation) -> io::Result<()> {
        let unread = conversation.operator_unread();
        let icon = if conversation.is_resolved() {
            ICON_RESOLVED
        } else if unread > 0 {
            ICON_UNREAD
        } else {
            ICON_OPEN
        };
        let last = match conversation.last_message() {
            Some(_) => self.time(conversation.updated_at),
            None => "N/A".to_string(),
        };

        writeln!(self.out, "{icon} {}", conversation.display_name())?;
        writeln!(self.out, "   ID: {}", conversation.session_id)?;
        writeln!(
            self.out,
            "   Status: {} | Unread: {unread} | Last: {last}",
            conversation.state_label()
        )?;
        if let Some(preview) = conversation.preview() {
            writeln!(self.out, "   Preview: \"{preview}\"")?;
        }
        writeln!(self.out)
    }

    /// Messages of a conversation, which must already be oldest-first.
    pub fn messages(&mut self, session_id: &str, messages: &[Message]) -> io::Result<()> {
        if messages.is_empty() {
            return writeln!(self.out, "No messages in this conversation.");
        }
        writeln!(self.out, "\n💬 Conversation {session_id}:\n")?;
        for message in messages {
            let role = if message.is_from_customer() {
                "👤 Customer"
            } else {
                "🤖 Agent"
            };
            let time = self.time(message.timestamp);
            writeln!(self.out, "[{time}] {role}:")?;
            writeln!(self.out, "  {}", message.body())?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Details of one conversation.
    pub fn conversation_info(&mut self, conversation: &Conversation) -> io::Result<()> {
        writeln!(self.out, "\n📋 Conversation Info:\n")?;
        writeln!(self.out, "Session ID: {}", conversation.session_id)?;
        let state = conversation.state.as_deref().unwrap_or("unknown");
        writeln!(self.out, "State: {state}")?;
        let created = self.time(conversation.created_at);
        let updated = self.time(conversation.updated_at);
        writeln!(self.out, "Created: {created}")?;
        writeln!(self.out, "Updated: {updated}")?;

        if let Some(meta) = &conversation.meta {
            self.customer(meta)?;
        }

        if let Some(unread) = &conversation.unread {
            writeln!(
                self.out,
                "\n📬 Unread: {} (operator), {} (visitor)",
                unread.operator, unread.visitor
            )?;
        }
        Ok(())
    }

    fn customer(&mut self, meta: &ConversationMeta) -> io::Result<()> {
        writeln!(self.out, "\n👤 Customer:")?;
        let fields = [
            ("Name", &meta.nickname),
            ("Email", &meta.email),
            ("Phone", &meta.phone),
            ("IP", &meta.ip),
        ];
        for (label, value) in fields {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                writeln!(self.out, "   {label}: {value}")?;
            }
        }
        if let Some(device) = &meta.device {
            writeln!(self.out, "   Device: {device}")?;
        }
        Ok(())
    }

    /// Confirmation for `reply`.
    pub fn message_sent(&mut self, session_id: &str) -> io::Result<()> {
        writeln!(self.out, "{ICON_RESOLVED} Message sent to conversation {session_id}")
    }

    /// Confirmation for `resolve`.
    pub fn resolved(&mut self, session_id: &str) -> io::Result<()> {
        writeln!(self.out, "{ICON_RESOLVED} Conversation {session_id} marked as resolved")
    }

    /// Confirmation for `reopen`.
    pub fn reopened(&mut self, session_id: &str) -> io::Result<()> {
        writeln!(self.out, "{ICON_RESOLVED} Conversation {session_id} reopened")
    }

    /// Free-form text, e.g. the help screen.
    pub fn text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }
}
