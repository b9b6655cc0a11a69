use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The content of a conversation message.
///
/// Text messages carry a plain string. Other message types (files, pickers,
/// events...) carry an object, which sometimes has a `text` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),

    /// Structured content with an optional text field.
    Structured(StructuredContent),

    /// Anything else.
    Other(Value),
}

/// An object-shaped message content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StructuredContent {
    /// Text carried by the object, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MessageContent {
    /// Whether the content carries nothing displayable at all.
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.is_empty(),
            MessageContent::Structured(_) => false,
            MessageContent::Other(value) => match value {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64() == Some(0.0),
                _ => false,
            },
        }
    }

    /// The text to display, if the content has any.
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Structured(structured) => {
                structured.text.as_deref().filter(|t| !t.is_empty())
            }
            MessageContent::Other(_) => None,
        }
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}
