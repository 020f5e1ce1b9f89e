use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use chirp_protocol::{ChatMessage, DirectRoomSummary, GroupRoomSummary, RoomId, UserId};

use crate::backend::{ApiError, ChatBackend};
use crate::event::UiEvent;
use crate::poll::{PollPolicy, PollTask};
use crate::session::{ActiveRoom, WidgetState};
use crate::view::{Direction, MessageRow, WidgetView};

/// Panel title used when a room is opened without one.
const DEFAULT_TITLE: &str = "Chat";

/// The widget session controller.
///
/// Owns the active-room session, the recurring poll task and the send
/// path. Cloning is cheap and every clone drives the same session. The
/// poll task holds only a weak reference to the session, so dropping the
/// last handle stops polling.
#[derive(Clone)]
pub struct ChatWidget {
    inner: Arc<WidgetInner>,
}

struct WidgetInner {
    state: WidgetState,
    poll: Mutex<Option<PollTask>>,
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn WidgetView>,
    me: UserId,
    policy: PollPolicy,
}

impl ChatWidget {
    /// Build a widget for the user identified by `me`.
    ///
    /// Must be called within a tokio runtime; opening a room spawns the
    /// poll task on it.
    pub fn new(backend: Arc<dyn ChatBackend>, view: Arc<dyn WidgetView>, me: UserId) -> Self {
        Self::with_policy(backend, view, me, PollPolicy::default())
    }

    pub fn with_policy(
        backend: Arc<dyn ChatBackend>,
        view: Arc<dyn WidgetView>,
        me: UserId,
        policy: PollPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(WidgetInner {
                state: WidgetState::new(),
                poll: Mutex::new(None),
                backend,
                view,
                me,
                policy,
            }),
        }
    }

    /// Make `room` the active room, reveal the panel and start polling.
    ///
    /// A blank or missing title falls back to a default label. Any
    /// previous poll task is cancelled before the new one is scheduled,
    /// and one fetch-render runs immediately so the panel is not empty
    /// until the first tick.
    pub async fn open_room(&self, room: RoomId, title: Option<&str>) {
        let title = match title.map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => DEFAULT_TITLE.to_string(),
        };

        self.inner.state.generation.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut session) = self.inner.state.session.write() {
            session.active = Some(ActiveRoom {
                id: room,
                title: title.clone(),
            });
            session.last_message_id = None;
        }

        self.inner.view.set_title(&title);
        self.inner.view.clear_messages();
        self.inner.view.set_panel_open(true);

        self.stop_poll();
        self.inner.refresh_messages().await;
        self.start_poll();
    }

    /// Create or look up the one-to-one room with `target` and open it.
    ///
    /// The title resolves as server-provided room name, then `nickname`,
    /// then a default label. On failure the session is left untouched and
    /// the view is notified.
    pub async fn open_direct_chat(&self, target: UserId, nickname: Option<&str>) {
        match self.inner.backend.open_direct_room(target).await {
            Ok(room) => {
                let title = room.resolve_title(nickname);
                self.open_room(room.id, Some(&title)).await;
            }
            Err(error) => {
                tracing::warn!(target_user = target.0, error = %error, "failed to open direct chat room");
                self.inner.view.notify("Couldn't open the chat room.");
            }
        }
    }

    /// Run one fetch-render cycle outside the timer cadence.
    pub async fn refresh_messages(&self) {
        self.inner.refresh_messages().await;
    }

    /// Submit the input field's text to the active room.
    ///
    /// No-op when the trimmed input is empty or no room is active. On
    /// success the input is cleared and one out-of-band refresh runs so
    /// the sender sees the message before the next tick; on failure the
    /// input stays as typed so the user can retry.
    pub async fn send_message(&self) {
        let text = self.inner.view.input_text();
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let Some(room) = self.active_room() else {
            return;
        };

        match self.inner.backend.send_message(room, text).await {
            Ok(()) => {
                self.inner.view.clear_input();
                self.inner.refresh_messages().await;
            }
            Err(error) => {
                tracing::warn!(room = room.0, error = %error, "failed to send message");
                self.inner.view.notify("Couldn't send your message.");
            }
        }
    }

    /// Flip panel visibility.
    ///
    /// Hiding pauses the poll task. Revealing with an active room runs
    /// one fetch-render and resumes polling, so the stale list is
    /// replaced before the user can read it.
    pub async fn toggle_panel(&self) {
        let open = !self.inner.view.panel_open();
        self.inner.view.set_panel_open(open);

        if !open {
            self.stop_poll();
            return;
        }

        if self.active_room().is_some() {
            self.inner.refresh_messages().await;
            self.start_poll();
        }
    }

    /// Dispatch one UI event from the embedding surface.
    pub async fn handle_event(&self, event: UiEvent) {
        match event {
            UiEvent::TogglePressed => self.toggle_panel().await,
            UiEvent::SendPressed | UiEvent::EnterPressed { shift: false } => {
                self.send_message().await;
            }
            UiEvent::EnterPressed { shift: true } => {}
        }
    }

    /// The caller's one-to-one rooms, for a directory listing.
    pub async fn direct_rooms(&self) -> Result<Vec<DirectRoomSummary>, ApiError> {
        self.inner.backend.direct_rooms().await
    }

    /// The caller's group rooms, for a directory listing.
    pub async fn group_rooms(&self) -> Result<Vec<GroupRoomSummary>, ApiError> {
        self.inner.backend.group_rooms().await
    }

    /// Total unread count across all rooms, for a badge.
    pub async fn total_unread(&self) -> Result<u64, ApiError> {
        Ok(self.inner.backend.unread_count().await?.total_unread)
    }

    /// Acknowledge the newest rendered message in the active room.
    ///
    /// No-op when no room is active or nothing has rendered yet. Never
    /// called from the poll loop: polling behind a hidden panel must not
    /// mark messages as read.
    pub async fn mark_read(&self) -> Result<(), ApiError> {
        let target = match self.inner.state.session.read() {
            Ok(session) => session
                .active
                .as_ref()
                .map(|active| active.id)
                .zip(session.last_message_id),
            Err(_) => None,
        };

        match target {
            Some((room, last_message_id)) => {
                self.inner.backend.mark_read(room, last_message_id).await
            }
            None => Ok(()),
        }
    }

    /// Id of the active room, if any.
    pub fn active_room(&self) -> Option<RoomId> {
        self.inner
            .state
            .session
            .read()
            .ok()?
            .active
            .as_ref()
            .map(|active| active.id)
    }

    /// Title of the active room, if any.
    pub fn room_title(&self) -> Option<String> {
        self.inner
            .state
            .session
            .read()
            .ok()?
            .active
            .as_ref()
            .map(|active| active.title.clone())
    }

    /// Whether a recurring poll task is live.
    pub fn is_polling(&self) -> bool {
        self.inner
            .poll
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn start_poll(&self) {
        let period = self.inner.policy.period;
        let weak = Arc::downgrade(&self.inner);

        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                let Some(widget) = weak.upgrade() else {
                    break;
                };
                widget.refresh_messages().await;
            }
        });

        if let Ok(mut slot) = self.inner.poll.lock() {
            // Replacing the previous task aborts it.
            *slot = Some(PollTask::new(task));
        }
    }

    fn stop_poll(&self) {
        if let Ok(mut slot) = self.inner.poll.lock() {
            *slot = None;
        }
    }
}

impl WidgetInner {
    /// One fetch-render cycle for the active room.
    ///
    /// Silent no-op when no room is active. Poll failures leave the stale
    /// list in place; the timer is the retry. Only a response whose
    /// captured render generation is still current is applied, so a fetch
    /// that raced a room switch is dropped instead of rendering over the
    /// new room.
    async fn refresh_messages(&self) {
        let (room, generation) = {
            let Ok(session) = self.state.session.read() else {
                return;
            };
            let Some(active) = &session.active else {
                return;
            };
            (active.id, self.state.generation.load(Ordering::SeqCst))
        };

        let messages = match self.backend.fetch_messages(room).await {
            Ok(messages) => messages,
            Err(error) => {
                tracing::debug!(room = room.0, error = %error, "message poll failed");
                return;
            }
        };

        if self.state.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(room = room.0, "discarding stale message response");
            return;
        }

        let rows: Vec<MessageRow> = messages
            .iter()
            .map(|message| self.row_for(message))
            .collect();

        if let Ok(mut session) = self.state.session.write() {
            session.last_message_id = messages.last().map(|message| message.id);
        }
        self.view.render_messages(&rows);
    }

    fn row_for(&self, message: &ChatMessage) -> MessageRow {
        let direction = if message.is_from(self.me) {
            Direction::Mine
        } else {
            Direction::Theirs
        };

        MessageRow {
            direction,
            sender: message.sender_nickname.clone(),
            content: message.content.clone(),
        }
    }
}
