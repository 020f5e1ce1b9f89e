use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chirp_widget::{
    ChatWidget, Direction, HttpBackend, MessageRow, RoomId, UiEvent, UserId, WidgetView,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Renders the widget into the terminal.
#[derive(Default)]
struct TermView {
    open: AtomicBool,
    title: Mutex<String>,
    input: Mutex<String>,
}

impl TermView {
    fn type_text(&self, text: &str) {
        if let Ok(mut input) = self.input.lock() {
            *input = text.to_string();
        }
    }
}

impl WidgetView for TermView {
    fn set_title(&self, title: &str) {
        if let Ok(mut current) = self.title.lock() {
            *current = title.to_string();
        }
    }

    fn set_panel_open(&self, open: bool) {
        self.open.store(open, Ordering::SeqCst);
        println!("-- panel {}", if open { "open" } else { "closed" });
    }

    fn panel_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn clear_messages(&self) {}

    fn render_messages(&self, rows: &[MessageRow]) {
        let title = self
            .title
            .lock()
            .map(|title| title.clone())
            .unwrap_or_default();
        println!("== {} ==", title);
        for row in rows {
            match row.direction {
                Direction::Mine => println!("{:>12}: {}", "you", row.content),
                Direction::Theirs => println!("{:>12}: {}", row.sender, row.content),
            }
        }
    }

    fn input_text(&self) -> String {
        self.input
            .lock()
            .map(|input| input.clone())
            .unwrap_or_default()
    }

    fn clear_input(&self) {
        if let Ok(mut input) = self.input.lock() {
            input.clear();
        }
    }

    fn notify(&self, message: &str) {
        println!("!! {}", message);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /open <roomId> [title]   - Open a room by id");
    println!("  /direct <userId> [nick]  - Open a one-to-one chat");
    println!("  /toggle                  - Show or hide the panel");
    println!("  /rooms                   - List your one-to-one rooms");
    println!("  /unread                  - Total unread count");
    println!("  /read                    - Mark the open room as read");
    println!("  /quit                    - Exit");
    println!("  <message>                - Send to the open room");
}

async fn handle_command(widget: &ChatWidget, cmd: &str, arg: Option<&str>) -> bool {
    match cmd {
        "help" => print_help(),
        "open" => {
            let mut parts = arg.unwrap_or_default().splitn(2, ' ');
            match parts.next().and_then(|id| id.parse::<i64>().ok()) {
                Some(id) => widget.open_room(RoomId(id), parts.next()).await,
                None => println!("Usage: /open <roomId> [title]"),
            }
        }
        "direct" => {
            let mut parts = arg.unwrap_or_default().splitn(2, ' ');
            match parts.next().and_then(|id| id.parse::<i64>().ok()) {
                Some(id) => widget.open_direct_chat(UserId(id), parts.next()).await,
                None => println!("Usage: /direct <userId> [nick]"),
            }
        }
        "toggle" => widget.handle_event(UiEvent::TogglePressed).await,
        "rooms" => match widget.direct_rooms().await {
            Ok(rooms) => {
                for room in rooms {
                    println!(
                        "#{} {} ({} unread)",
                        room.room_id, room.partner_nickname, room.unread_count
                    );
                }
            }
            Err(e) => println!("Error: {}", e),
        },
        "unread" => match widget.total_unread().await {
            Ok(count) => println!("{} unread", count),
            Err(e) => println!("Error: {}", e),
        },
        "read" => {
            if let Err(e) = widget.mark_read().await {
                println!("Error: {}", e);
            }
        }
        "quit" => return false,
        _ => print_help(),
    }
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    let base_url =
        std::env::var("CHIRP_SERVER").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let me: i64 = std::env::var("CHIRP_USER_ID")
        .ok()
        .and_then(|id| id.parse().ok())
        .unwrap_or(0);

    let view = Arc::new(TermView::default());
    let backend = Arc::new(HttpBackend::new(base_url));
    let widget = ChatWidget::new(backend, view.clone(), UserId(me));

    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('/') {
            let (cmd, arg) = match rest.split_once(' ') {
                Some((cmd, arg)) => (cmd, Some(arg.trim())),
                None => (rest, None),
            };
            if !handle_command(&widget, cmd, arg).await {
                break;
            }
        } else {
            view.type_text(line);
            widget.handle_event(UiEvent::SendPressed).await;
        }
    }

    Ok(())
}
