use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visitor details attached to a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConversationMeta {
    /// Visitor nickname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    /// Visitor email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Visitor phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Visitor IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// Free-form device information (browser, OS, geolocation...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Value>,
}

impl ConversationMeta {
    /// Nickname, else email, else `Unknown`.
    pub fn display_name(&self) -> &str {
        non_empty(&self.nickname)
            .or_else(|| non_empty(&self.email))
            .unwrap_or("Unknown")
    }
}

/// Returns the string when it is present and not empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
