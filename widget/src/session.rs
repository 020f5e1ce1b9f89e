use std::sync::RwLock;
use std::sync::atomic::AtomicU64;

use chirp_protocol::RoomId;

/// The room the widget is currently showing.
#[derive(Debug, Clone)]
pub(crate) struct ActiveRoom {
    pub id: RoomId,
    pub title: String,
}

/// Mutable session fields guarded by the lock in [`WidgetState`].
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub active: Option<ActiveRoom>,
    /// Newest message id handed to the view; reported by read
    /// acknowledgement.
    pub last_message_id: Option<i64>,
}

/// Session state shared between the controller handle and the poll task.
pub(crate) struct WidgetState {
    pub session: RwLock<SessionState>,
    /// Render generation. Bumped on every room switch; a fetch whose
    /// captured generation is no longer current must not render.
    pub generation: AtomicU64,
}

impl WidgetState {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(SessionState::default()),
            generation: AtomicU64::new(0),
        }
    }
}
