//! Keyboard shortcut handling.
//!
//! While a text field has focus, printable keys edit the field instead of
//! triggering shortcuts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Cancel,
    NextFocus,
    PrevFocus,
    Left,
    Right,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    Submit,
    ToggleLogs,
    Input(char),
    Backspace,
    None,
}

/// Map a key event to an action.
///
/// `editing` is true while one of the freeform group fields has focus.
#[must_use]
pub fn map_key(key: KeyEvent, editing: bool) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Cancel,
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab => KeyAction::NextFocus,
        KeyCode::BackTab => KeyAction::PrevFocus,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        KeyCode::Backspace if editing => KeyAction::Backspace,
        KeyCode::Char(c) if editing => KeyAction::Input(c),
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('l') => KeyAction::ToggleLogs,
        _ => KeyAction::None,
    }
}
