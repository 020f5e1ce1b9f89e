mod backend;
mod controller;
mod event;
mod poll;
mod session;
mod view;


pub use chirp_protocol::{ChatMessage, DirectRoomSummary, GroupRoomSummary, RoomId, UserId};

pub use backend::{ApiError, ChatBackend, HttpBackend};
pub use controller::ChatWidget;
pub use event::UiEvent;
pub use poll::PollPolicy;
pub use view::{Direction, MessageRow, WidgetView};
