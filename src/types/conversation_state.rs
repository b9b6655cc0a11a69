use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The state of a conversation as tracked by Crisp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConversationState {
    /// Waiting on an operator.
    Pending,
    /// Opened but not yet resolved.
    Unresolved,
    /// Closed by an operator.
    Resolved,
}

impl ConversationState {
    /// The wire representation of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Pending => "pending",
            ConversationState::Unresolved => "unresolved",
            ConversationState::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ConversationState::Pending),
            "unresolved" => Ok(ConversationState::Unresolved),
            "resolved" => Ok(ConversationState::Resolved),
            _ => Err(format!("unknown conversation state: {s}")),
        }
    }
}

/// Body of a `PATCH .../state` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateUpdate {
    /// The state to move the conversation to.
    pub state: ConversationState,
}

impl StateUpdate {
    /// Creates a state update.
    pub fn new(state: ConversationState) -> Self {
        Self { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn state_update_serialization() {
        assert_eq!(
            to_value(StateUpdate::new(ConversationState::Resolved)).unwrap(),
            json!({"state": "resolved"})
        );
        assert_eq!(
            to_value(StateUpdate::new(ConversationState::Pending)).unwrap(),
            json!({"state": "pending"})
        );
    }

    #[test]
    fn parse_states() {
        assert_eq!(
            "unresolved".parse::<ConversationState>(),
            Ok(ConversationState::Unresolved)
        );
        assert!("closed".parse::<ConversationState>().is_err());
        assert_eq!(ConversationState::Resolved.to_string(), "resolved");
    }
}
