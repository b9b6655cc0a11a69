use serde::{Deserialize, Serialize};

/// Body of a `POST .../message` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageParam {
    /// Message type, always `text` for replies.
    #[serde(rename = "type")]
    pub r#type: String,

    /// Sender side.
    pub from: String,

    /// Channel the message originates from.
    pub origin: String,

    /// The message text.
    pub content: String,
}

impl MessageParam {
    /// A plain-text chat message sent by an operator.
    pub fn operator_text<S: Into<String>>(content: S) -> Self {
        Self {
            r#type: "text".to_string(),
            from: "operator".to_string(),
            origin: "chat".to_string(),
            content: content.into(),
        }
    }
}
