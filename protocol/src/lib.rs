use std::fmt;

use serde::{Deserialize, Serialize};

pub mod api;
pub mod message;

pub use api::{
    DEFAULT_DIRECT_TITLE, DirectRoomOpened, DirectRoomSummary, GroupRoomSummary, MarkReadRequest,
    SendRequest, UnreadCount,
};
pub use message::ChatMessage;


/// Numeric identifier of a chat room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub i64);

/// Numeric identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
