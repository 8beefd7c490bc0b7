use serde::{Deserialize, Serialize};

/// All user input actions the editor understands
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveToStart,
    MoveToEnd,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,

    // Editing
    StartEdit,
    ConfirmEdit,
    CancelEdit,
    Backspace,

    // Structural changes
    AddRow,
    DelRow,
    AddCol,
    DelCol,

    // Editor pane
    FocusEditor,
    ApplyEditor,
    ClearEditor,

    // File
    Open,
    Save,
    SaveAs,

    // Application
    Quit,

    // Character input
    InsertChar(char),

    // Unknown/unmapped
    None,
}

/// Key codes for common keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Special keys
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Character key
    Char(char),

    // Unknown
    Unknown,
}

/// Modifier keys state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    pub fn none_pressed(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }

    pub fn only_shift(&self) -> bool {
        self.shift && !self.ctrl && !self.alt
    }

    pub fn only_ctrl(&self) -> bool {
        !self.shift && self.ctrl && !self.alt
    }
}

/// Maps a key and modifiers to an InputAction.
///
/// The mapping is context-free; the controller decides what an action means
/// in the current mode (for example `ConfirmEdit` starts an edit when
/// viewing and commits one when editing).
pub fn key_to_action(key: Key, modifiers: Modifiers) -> InputAction {
    // Shifted letters arrive uppercase from the terminal; fold them so the
    // Ctrl+Shift chords match.
    let key = match key {
        Key::Char(c) if modifiers.ctrl => Key::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match key {
        // Arrow keys - navigation
        Key::ArrowUp if modifiers.none_pressed() => InputAction::MoveUp,
        Key::ArrowDown if modifiers.none_pressed() => InputAction::MoveDown,
        Key::ArrowLeft if modifiers.none_pressed() => InputAction::MoveLeft,
        Key::ArrowRight if modifiers.none_pressed() => InputAction::MoveRight,

        // Home/End within the row
        Key::Home if modifiers.none_pressed() => InputAction::MoveToStart,
        Key::End if modifiers.none_pressed() => InputAction::MoveToEnd,

        // Ctrl+Home/End - corners of the grid
        Key::Home if modifiers.only_ctrl() => InputAction::MoveToTop,
        Key::End if modifiers.only_ctrl() => InputAction::MoveToBottom,

        // Page Up/Down
        Key::PageUp if modifiers.none_pressed() => InputAction::PageUp,
        Key::PageDown if modifiers.none_pressed() => InputAction::PageDown,

        // Enter confirms (or starts) an edit; Shift+Enter moves up
        Key::Enter if modifiers.none_pressed() => InputAction::ConfirmEdit,
        Key::Enter if modifiers.only_shift() => InputAction::MoveUp,
        Key::Enter if modifiers.only_ctrl() => InputAction::ApplyEditor,

        // Escape
        Key::Escape => InputAction::CancelEdit,

        // Tab advances across the row
        Key::Tab if modifiers.none_pressed() => InputAction::MoveRight,
        Key::Tab if modifiers.only_shift() => InputAction::MoveLeft,

        Key::Backspace => InputAction::Backspace,
        Key::Delete => InputAction::Backspace,

        // Ctrl shortcuts
        Key::Char('o') if modifiers.only_ctrl() => InputAction::Open,
        Key::Char('s') if modifiers.only_ctrl() => InputAction::Save,
        Key::Char('s') if modifiers.ctrl && modifiers.shift => InputAction::SaveAs,
        Key::Char('e') if modifiers.only_ctrl() => InputAction::FocusEditor,
        Key::Char('l') if modifiers.only_ctrl() => InputAction::ClearEditor,
        Key::Char('q') if modifiers.only_ctrl() => InputAction::Quit,
        Key::Char('r') if modifiers.only_ctrl() => InputAction::AddRow,
        Key::Char('r') if modifiers.ctrl && modifiers.shift => InputAction::DelRow,
        Key::Char('k') if modifiers.only_ctrl() => InputAction::AddCol,
        Key::Char('k') if modifiers.ctrl && modifiers.shift => InputAction::DelCol,

        Key::Char(c) if modifiers.none_pressed() || modifiers.only_shift() => {
            InputAction::InsertChar(c)
        }

        // Unknown
        _ => InputAction::None,
    }
}

/// Check if an action is a navigation action
pub fn is_navigation_action(action: &InputAction) -> bool {
    matches!(
        action,
        InputAction::MoveUp
            | InputAction::MoveDown
            | InputAction::MoveLeft
            | InputAction::MoveRight
            | InputAction::MoveToStart
            | InputAction::MoveToEnd
            | InputAction::MoveToTop
            | InputAction::MoveToBottom
            | InputAction::PageUp
            | InputAction::PageDown
    )
}
