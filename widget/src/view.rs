/// Which side of the conversation a rendered row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Mine,
    Theirs,
}

/// One message prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRow {
    pub direction: Direction,
    pub sender: String,
    pub content: String,
}

/// Rendering and input surface the widget drives.
///
/// Implementations are expected to be cheap, non-blocking UI mutations
/// with interior mutability; the widget calls them from async context and
/// holds no locks while doing so.
pub trait WidgetView: Send + Sync {
    /// Set the panel header title.
    fn set_title(&self, title: &str);

    /// Show or hide the panel.
    fn set_panel_open(&self, open: bool);

    /// Whether the panel is currently visible.
    fn panel_open(&self) -> bool;

    /// Empty the message area.
    fn clear_messages(&self);

    /// Replace the message area with `rows`, newest last, and leave the
    /// view scrolled to the newest entry.
    fn render_messages(&self, rows: &[MessageRow]);

    /// Current contents of the input field.
    fn input_text(&self) -> String;

    /// Empty the input field.
    fn clear_input(&self);

    /// Surface a user-visible failure notification.
    fn notify(&self, message: &str);
}
