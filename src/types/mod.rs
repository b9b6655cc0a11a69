// Public modules
pub mod conversation;
pub mod conversation_filter;
pub mod conversation_meta;
pub mod conversation_state;
pub mod message;
pub mod message_content;
pub mod message_param;
pub mod unread;

// Re-exports
pub use conversation::{Conversation, PREVIEW_CHARS, truncate_preview};
pub use conversation_filter::ConversationFilter;
pub use conversation_meta::ConversationMeta;
pub use conversation_state::{ConversationState, StateUpdate};
pub use message::Message;
pub use message_content::{MessageContent, StructuredContent};
pub use message_param::MessageParam;
pub use unread::Unread;

use serde::{Deserialize, Deserializer};

/// Deserializes an explicit `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
