use serde::{Deserialize, Serialize};

use crate::RoomId;

/// Fallback title for a one-to-one room when neither the server nor the
/// caller supplies a display name.
pub const DEFAULT_DIRECT_TITLE: &str = "Direct chat";

/// Body for `POST /api/chat/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub room_id: RoomId,
    pub content: String,
}

/// Response of `POST /api/chat/direct/{targetUserId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectRoomOpened {
    pub id: RoomId,
    #[serde(default)]
    pub room_key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl DirectRoomOpened {
    /// Resolve the panel title for this room: server-provided name first,
    /// then the caller-supplied nickname, then [`DEFAULT_DIRECT_TITLE`].
    /// Blank strings count as absent.
    pub fn resolve_title(&self, nickname: Option<&str>) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| nickname.filter(|nick| !nick.trim().is_empty()))
            .unwrap_or(DEFAULT_DIRECT_TITLE)
            .to_string()
    }
}

/// One entry of `GET /api/chat/my-direct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectRoomSummary {
    pub room_id: RoomId,
    #[serde(default)]
    pub partner_nickname: String,
    #[serde(default)]
    pub last_message_preview: Option<String>,
    #[serde(default)]
    pub unread_count: u64,
    #[serde(default)]
    pub last_message_created_at: Option<String>,
}

/// One entry of `GET /api/chat/my-groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRoomSummary {
    pub room_id: RoomId,
    #[serde(default)]
    pub group_title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_message_preview: Option<String>,
    #[serde(default)]
    pub unread_count: u64,
    #[serde(default)]
    pub last_message_created_at: Option<String>,
}

impl GroupRoomSummary {
    /// Display title for a group room, falling back to the raw room name.
    pub fn display_title(&self) -> &str {
        self.group_title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .or(self.name.as_deref())
            .unwrap_or("Group chat")
    }
}

/// Body for `POST /api/chat/rooms/{roomId}/read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub last_message_id: i64,
}

/// Response of `GET /api/chat/unread-count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub total_unread: u64,
}
