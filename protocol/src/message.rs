use serde::{Deserialize, Serialize};

use crate::UserId;

/// A single chat message as returned by the message list endpoint.
///
/// The server returns messages already in display order; clients render the
/// sequence as-is and replace the whole list on every fetch rather than
/// merging with what was rendered before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub sender_id: UserId,
    #[serde(default)]
    pub sender_nickname: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Read receipt for one-to-one rooms.
    #[serde(default)]
    pub read_by_all: bool,
    /// Number of group members that have not read this message yet.
    /// Absent outside group rooms.
    #[serde(default)]
    pub unread_member_count: Option<u32>,
}

impl ChatMessage {
    /// Whether this message was sent by the given user.
    pub fn is_from(&self, user: UserId) -> bool {
        self.sender_id == user
    }
}
