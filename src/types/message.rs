use serde::{Deserialize, Serialize};

use crate::types::MessageContent;

/// Value of `from` for messages sent by the visitor.
const FROM_USER: &str = "user";

/// A message in a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Message {
    /// Sender side: `user` for the visitor, `operator` for agents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Send time, seconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,

    /// Message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,

    /// Message type (`text`, `file`, `picker`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

impl Message {
    /// Whether the visitor sent this message.
    pub fn is_from_customer(&self) -> bool {
        self.from.as_deref() == Some(FROM_USER)
    }

    /// The message type, or `message` when none was sent.
    pub fn type_label(&self) -> &str {
        self.r#type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("message")
    }

    /// The line to display for this message's content.
    pub fn body(&self) -> String {
        match &self.content {
            None => "[no content]".to_string(),
            Some(content) if content.is_empty() => "[no content]".to_string(),
            Some(content) => match content.text() {
                Some(text) => text.to_string(),
                None => format!("[{}]", self.type_label()),
            },
        }
    }
}
