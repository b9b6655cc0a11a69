use serde::{Deserialize, Serialize};

use crate::types::conversation_meta::non_empty;
use crate::types::{ConversationMeta, ConversationState, Unread, null_as_default};

/// Longest last-message preview shown before truncating.
pub const PREVIEW_CHARS: usize = 60;

/// A conversation (session) on a Crisp website.
///
/// Only the fields the client displays are modeled; everything else in the
/// API payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Conversation {
    /// Session identifier, e.g. `session_700c65e1-85e2-465a-b9ac-ecb5ec2c9881`.
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,

    /// Raw state string (`pending`, `unresolved`, `resolved`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Unread counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<Unread>,

    /// Excerpt of the most recent message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,

    /// Creation time, seconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<f64>,

    /// Last update time, seconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<f64>,

    /// Visitor details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ConversationMeta>,
}

impl Conversation {
    /// Nickname, else email, else `Unknown`.
    pub fn display_name(&self) -> &str {
        self.meta
            .as_ref()
            .map(ConversationMeta::display_name)
            .unwrap_or("Unknown")
    }

    /// The state as a known enum value, if it is one.
    pub fn known_state(&self) -> Option<ConversationState> {
        self.state.as_deref().and_then(|s| s.parse().ok())
    }

    /// The raw state, or `unknown` when the API did not send one.
    pub fn state_label(&self) -> &str {
        non_empty(&self.state).unwrap_or("unknown")
    }

    /// Messages the operators have not read yet.
    pub fn operator_unread(&self) -> u64 {
        self.unread.map(|u| u.operator).unwrap_or(0)
    }

    /// Whether the conversation is resolved.
    pub fn is_resolved(&self) -> bool {
        self.known_state() == Some(ConversationState::Resolved)
    }

    /// The last message, when there is a non-empty one.
    pub fn last_message(&self) -> Option<&str> {
        non_empty(&self.last_message)
    }

    /// The last message cut to [`PREVIEW_CHARS`] characters, with `...` when cut.
    pub fn preview(&self) -> Option<String> {
        self.last_message().map(truncate_preview)
    }
}

/// Truncates `text` to [`PREVIEW_CHARS`] characters, appending `...` when it was longer.
pub fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_api_payload() {
        let conversation: Conversation = serde_json::from_value(json!({
            "session_id": "session_abc",
            "website_id": "site-1",
            "state": "pending",
            "unread": {"operator": 3, "visitor": 0},
            "last_message": "Hello there",
            "created_at": 1700000000,
            "updated_at": 1700000100,
            "meta": {"nickname": "Ada"}
        }))
        .unwrap();
        assert_eq!(conversation.session_id, "session_abc");
        assert_eq!(conversation.known_state(), Some(ConversationState::Pending));
        assert_eq!(conversation.operator_unread(), 3);
        assert_eq!(conversation.updated_at, Some(1700000100.0));
        assert_eq!(conversation.display_name(), "Ada");
        assert!(!conversation.is_resolved());
    }

    #[test]
    fn missing_fields_have_defaults() {
        let conversation: Conversation =
            serde_json::from_value(json!({"session_id": "session_abc"})).unwrap();
        assert_eq!(conversation.display_name(), "Unknown");
        assert_eq!(conversation.state_label(), "unknown");
        assert_eq!(conversation.operator_unread(), 0);
        assert_eq!(conversation.preview(), None);
    }

    #[test]
    fn page_with_null_fields_decodes() {
        let page: Vec<Conversation> = serde_json::from_value(json!([
            {"session_id": "a", "unread": {"operator": null, "visitor": 1}},
            {"session_id": "b", "state": "resolved"},
            {"session_id": null, "unread": null}
        ]))
        .unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].operator_unread(), 0);
        assert!(page[1].is_resolved());
        assert_eq!(page[2].session_id, "");
        assert_eq!(page[2].operator_unread(), 0);
    }

    #[test]
    fn preview_of_sixty_characters_is_unmodified() {
        let text = "a".repeat(60);
        assert_eq!(truncate_preview(&text), text);
    }

    #[test]
    fn preview_longer_than_sixty_is_cut_with_ellipsis() {
        let text = format!("{}{}", "b".repeat(60), "overflow");
        let preview = truncate_preview(&text);
        assert_eq!(preview, format!("{}...", "b".repeat(60)));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(61);
        let preview = truncate_preview(&text);
        assert_eq!(preview.chars().count(), 63);
        assert!(preview.starts_with(&"é".repeat(60)));
        assert!(preview.ends_with("..."));
    }
}
