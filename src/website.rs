//! Typed access to the conversation endpoints of one website.
//!
//! Every method builds one path, performs exactly one call through the
//! [`Transport`], and decodes the `data` payload into the matching type.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::Transport;
use crate::error::{Error, Result};
use crate::types::{
    Conversation, ConversationFilter, ConversationState, Message, MessageParam, StateUpdate,
};

/// Number of conversations `list` asks for when no `--limit` is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// The conversation endpoints of a single website.
pub struct Website<'a> {
    transport: &'a dyn Transport,
    website_id: &'a str,
}

impl<'a> Website<'a> {
    /// Scope `transport` to `website_id`.
    pub fn new(transport: &'a dyn Transport, website_id: &'a str) -> Self {
        Self {
            transport,
            website_id,
        }
    }

    /// The website every call is scoped to.
    pub fn id(&self) -> &str {
        self.website_id
    }

    /// Path of the conversation list page, including the filter query.
    pub fn conversations_path(&self, filter: ConversationFilter, limit: u32) -> String {
        let path = format!("/website/{}/conversations/{}", self.website_id, limit);
        match filter.query() {
            Some(query) => format!("{path}?{query}"),
            None => path,
        }
    }

    /// Path of the conversation search, with `query` percent-encoded.
    pub fn search_path(&self, query: &str) -> String {
        format!(
            "/website/{}/conversations/search?search_query={}",
            self.website_id,
            urlencoding::encode(query)
        )
    }

    /// Path of a single conversation.
    pub fn conversation_path(&self, session_id: &str) -> String {
        format!("/website/{}/conversation/{}", self.website_id, session_id)
    }

    /// One page of conversations.
    pub async fn conversations(
        &self,
        filter: ConversationFilter,
        limit: u32,
    ) -> Result<Vec<Conversation>> {
        let data = self.get(&self.conversations_path(filter, limit)).await?;
        decode_list(data)
    }

    /// Conversations matching a free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<Conversation>> {
        let data = self.get(&self.search_path(query)).await?;
        decode_list(data)
    }

    /// Messages of a conversation, in the order the API returns them (newest first).
    pub async fn messages(&self, session_id: &str) -> Result<Vec<Message>> {
        let path = format!("{}/messages", self.conversation_path(session_id));
        let data = self.get(&path).await?;
        decode_list(data)
    }

    /// Send a message into a conversation.
    pub async fn send_message(&self, session_id: &str, message: &MessageParam) -> Result<()> {
        let path = format!("{}/message", self.conversation_path(session_id));
        self.transport
            .request(Method::POST, &path, Some(to_body(message)?))
            .await?;
        Ok(())
    }

    /// Move a conversation to `state`.
    pub async fn update_state(&self, session_id: &str, state: ConversationState) -> Result<()> {
        let path = format!("{}/state", self.conversation_path(session_id));
        self.transport
            .request(Method::PATCH, &path, Some(to_body(&StateUpdate::new(state))?))
            .await?;
        Ok(())
    }

    /// Details of one conversation.
    pub async fn conversation(&self, session_id: &str) -> Result<Conversation> {
        let data = self.get(&self.conversation_path(session_id)).await?;
        match data {
            Some(data) => decode(data),
            None => Err(Error::serialization(
                format!("no conversation data returned for {session_id}"),
                None,
            )),
        }
    }

    async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.transport.request(Method::GET, path, None).await
    }
}

fn to_body<T: Serialize>(body: &T) -> Result<Value> {
    Ok(serde_json::to_value(body)?)
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| {
        Error::serialization(
            format!("Failed to parse response: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// A missing payload is an empty list.
fn decode_list<T: DeserializeOwned>(data: Option<Value>) -> Result<Vec<T>> {
    match data {
        Some(data) => decode(data),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// One recorded call.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Call {
        pub method: Method,
        pub path: String,
        pub body: Option<Value>,
    }

    /// A transport that records calls and replies with a canned result.
    pub(crate) struct FakeTransport {
        pub calls: Mutex<Vec<Call>>,
        reply: Result<Option<Value>>,
    }

    impl FakeTransport {
        pub fn replying(data: Option<Value>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply: Ok(data),
            }
        }

        pub fn failing(err: Error) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply: Err(err),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn request(
            &self,
            method: Method,
            path: &str,
            body: Option<Value>,
        ) -> Result<Option<Value>> {
            self.calls.lock().unwrap().push(Call {
                method,
                path: path.to_string(),
                body,
            });
            self.reply.clone()
        }
    }

    #[test]
    fn conversations_path_per_filter() {
        let fake = FakeTransport::replying(None);
        let website = Website::new(&fake, "site-1");
        assert_eq!(
            website.conversations_path(ConversationFilter::Pending, 20),
            "/website/site-1/conversations/20?filter_unread=1&filter_not_resolved=1"
        );
        assert_eq!(
            website.conversations_path(ConversationFilter::Resolved, 5),
            "/website/site-1/conversations/5?filter_resolved=1"
        );
        assert_eq!(
            website.conversations_path(ConversationFilter::All, 20),
            "/website/site-1/conversations/20"
        );
    }

    #[test]
    fn search_path_encodes_query() {
        let fake = FakeTransport::replying(None);
        let website = Website::new(&fake, "site-1");
        assert_eq!(
            website.search_path("refund & return"),
            "/website/site-1/conversations/search?search_query=refund%20%26%20return"
        );
    }

    #[tokio::test]
    async fn conversations_decodes_page() {
        let fake = FakeTransport::replying(Some(json!([
            {"session_id": "s1", "state": "resolved"},
            {"session_id": "s2", "state": "pending"}
        ])));
        let website = Website::new(&fake, "site-1");
        let page = website
            .conversations(ConversationFilter::All, 20)
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert!(page[0].is_resolved());
        assert_eq!(fake.calls()[0].method, Method::GET);
    }

    #[tokio::test]
    async fn missing_list_payload_is_empty() {
        let fake = FakeTransport::replying(None);
        let website = Website::new(&fake, "site-1");
        assert!(website.search("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_message_posts_operator_text() {
        let fake = FakeTransport::replying(None);
        let website = Website::new(&fake, "site-1");
        website
            .send_message("s1", &MessageParam::operator_text("hello world"))
            .await
            .unwrap();
        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].path, "/website/site-1/conversation/s1/message");
        assert_eq!(
            calls[0].body,
            Some(json!({
                "type": "text",
                "from": "operator",
                "origin": "chat",
                "content": "hello world"
            }))
        );
    }

    #[tokio::test]
    async fn update_state_patches_state() {
        let fake = FakeTransport::replying(None);
        let website = Website::new(&fake, "site-1");
        website
            .update_state("s1", ConversationState::Pending)
            .await
            .unwrap();
        let calls = fake.calls();
        assert_eq!(calls[0].method, Method::PATCH);
        assert_eq!(calls[0].path, "/website/site-1/conversation/s1/state");
        assert_eq!(calls[0].body, Some(json!({"state": "pending"})));
    }

    #[tokio::test]
    async fn conversation_without_payload_is_an_error() {
        let fake = FakeTransport::replying(None);
        let website = Website::new(&fake, "site-1");
        let err = website.conversation("s1").await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn malformed_payload_is_serialization_error() {
        let fake = FakeTransport::replying(Some(json!({"not": "a list"})));
        let website = Website::new(&fake, "site-1");
        let err = website.messages("s1").await.unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
