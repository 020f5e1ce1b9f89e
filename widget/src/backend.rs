use async_trait::async_trait;
use chirp_protocol::{
    ChatMessage, DirectRoomOpened, DirectRoomSummary, GroupRoomSummary, MarkReadRequest, RoomId,
    SendRequest, UnreadCount, UserId,
};
use thiserror::Error;

/// Errors surfaced by [`ChatBackend`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("server returned status {code}")]
    Status { code: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The chat server as seen from the widget.
///
/// The widget only ever talks to the server through this trait, so tests
/// can swap in an in-memory implementation.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Create or look up the one-to-one room with the given user.
    async fn open_direct_room(&self, target: UserId) -> Result<DirectRoomOpened, ApiError>;

    /// Fetch the full message list of a room, in display order.
    async fn fetch_messages(&self, room: RoomId) -> Result<Vec<ChatMessage>, ApiError>;

    /// Submit one message to a room.
    async fn send_message(&self, room: RoomId, content: &str) -> Result<(), ApiError>;

    /// List the caller's one-to-one rooms.
    async fn direct_rooms(&self) -> Result<Vec<DirectRoomSummary>, ApiError>;

    /// List the caller's group rooms.
    async fn group_rooms(&self) -> Result<Vec<GroupRoomSummary>, ApiError>;

    /// Unread total across all of the caller's rooms.
    async fn unread_count(&self) -> Result<UnreadCount, ApiError>;

    /// Acknowledge everything up to `last_message_id` in a room.
    async fn mark_read(&self, room: RoomId, last_message_id: i64) -> Result<(), ApiError>;
}

/// [`ChatBackend`] over the server's `/api/chat` HTTP surface.
pub struct HttpBackend {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBackend {
    /// `base_url` is the server origin; trailing slashes are stripped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        check_status(&response)?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status {
            code: status.as_u16(),
        })
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn open_direct_room(&self, target: UserId) -> Result<DirectRoomOpened, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/chat/direct/{}", self.base_url, target))
            .send()
            .await?;
        check_status(&response)?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_messages(&self, room: RoomId) -> Result<Vec<ChatMessage>, ApiError> {
        self.get_json(&format!("/api/chat/messages?roomId={room}"))
            .await
    }

    async fn send_message(&self, room: RoomId, content: &str) -> Result<(), ApiError> {
        let request = SendRequest {
            room_id: room,
            content: content.to_string(),
        };

        let response = self
            .http
            .post(format!("{}/api/chat/send", self.base_url))
            .json(&request)
            .send()
            .await?;
        // Response body is not consumed.
        check_status(&response)
    }

    async fn direct_rooms(&self) -> Result<Vec<DirectRoomSummary>, ApiError> {
        self.get_json("/api/chat/my-direct").await
    }

    async fn group_rooms(&self) -> Result<Vec<GroupRoomSummary>, ApiError> {
        self.get_json("/api/chat/my-groups").await
    }

    async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        self.get_json("/api/chat/unread-count").await
    }

    async fn mark_read(&self, room: RoomId, last_message_id: i64) -> Result<(), ApiError> {
        let request = MarkReadRequest { last_message_id };

        let response = self
            .http
            .post(format!("{}/api/chat/rooms/{}/read", self.base_url, room))
            .json(&request)
            .send()
            .await?;
        check_status(&response)
    }
}
