use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which conversations `list` asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationFilter {
    /// Unread and not yet resolved.
    Pending,
    /// Resolved only.
    Resolved,
    /// No filtering.
    #[default]
    All,
}

impl ConversationFilter {
    /// Parses a `--status` value.
    ///
    /// Anything other than `pending` or `resolved` means [`ConversationFilter::All`].
    pub fn from_status(status: &str) -> Self {
        match status {
            "pending" => ConversationFilter::Pending,
            "resolved" => ConversationFilter::Resolved,
            _ => ConversationFilter::All,
        }
    }

    /// Query string (without the leading `?`) for this filter, if any.
    pub fn query(&self) -> Option<&'static str> {
        match self {
            ConversationFilter::Pending => Some("filter_unread=1&filter_not_resolved=1"),
            ConversationFilter::Resolved => Some("filter_resolved=1"),
            ConversationFilter::All => None,
        }
    }
}

impl fmt::Display for ConversationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationFilter::Pending => write!(f, "pending"),
            ConversationFilter::Resolved => write!(f, "resolved"),
            ConversationFilter::All => write!(f, "all"),
        }
    }
}

impl FromStr for ConversationFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ConversationFilter::from_status(s))
    }
}
