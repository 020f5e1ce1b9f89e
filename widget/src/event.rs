/// User-interface events the embedding surface forwards to the widget.
///
/// These mirror the three bindings of the panel: the toggle control, the
/// send control, and the Enter key in the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The panel toggle control was activated.
    TogglePressed,
    /// The send control was activated.
    SendPressed,
    /// Enter was pressed in the input field. With `shift` held the widget
    /// ignores it so the view can insert a newline instead.
    EnterPressed { shift: bool },
}
