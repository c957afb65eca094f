//! TUI message types (Elm Messages).

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiMessage {
    /// Formatted log line from the tracing bridge.
    Log(String),
    /// Error to surface in the log panel.
    Error(String),
    /// Key press event forwarded from the event loop.
    KeyPress(crate::keymap::KeyAction),
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Tick event for periodic redraws.
    Tick,
    /// Quit the application.
    Quit,
}
