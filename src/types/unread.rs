use serde::{Deserialize, Serialize};

use crate::types::null_as_default;

/// Unread message counts on a conversation, per side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Unread {
    /// Messages the operators have not read yet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub operator: u64,

    /// Messages the visitor has not read yet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub visitor: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_counts_default_to_zero() {
        let unread: Unread = serde_json::from_value(json!({"visitor": 2})).unwrap();
        assert_eq!(unread.operator, 0);
        assert_eq!(unread.visitor, 2);
    }

    #[test]
    fn null_counts_default_to_zero() {
        let unread: Unread =
            serde_json::from_value(json!({"operator": null, "visitor": 1})).unwrap();
        assert_eq!(unread, Unread { operator: 0, visitor: 1 });
    }
}
