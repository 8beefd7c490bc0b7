use serde::{Deserialize, Serialize};

use crate::position::CellPosition;

/// Edit mode determines what the user is currently editing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Not editing, just viewing the grid
    Viewing,
    /// Editing a cell directly in the grid
    CellEditing {
        position: CellPosition,
        content: String,
    },
    /// Editing in the secondary multi-line editor pane
    EditorPane {
        position: CellPosition,
        content: String,
    },
}

impl Default for EditMode {
    fn default() -> Self {
        Self::Viewing
    }
}

impl EditMode {
    pub fn is_viewing(&self) -> bool {
        matches!(self, EditMode::Viewing)
    }

    pub fn is_editing(&self) -> bool {
        !self.is_viewing()
    }

    pub fn is_cell_editing(&self) -> bool {
        matches!(self, EditMode::CellEditing { .. })
    }

    pub fn is_editor_pane(&self) -> bool {
        matches!(self, EditMode::EditorPane { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            EditMode::Viewing => None,
            EditMode::CellEditing { content, .. } => Some(content),
            EditMode::EditorPane { content, .. } => Some(content),
        }
    }

    pub fn position(&self) -> Option<CellPosition> {
        match self {
            EditMode::Viewing => None,
            EditMode::CellEditing { position, .. } => Some(*position),
            EditMode::EditorPane { position, .. } => Some(*position),
        }
    }
}

/// Manages the edit lifecycle of the grid.
///
/// The pending content lives here until [`commit`](EditState::commit) hands
/// it to the caller for writing into the sheet; the sheet is never mutated
/// from this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    mode: EditMode,
    /// Original content before editing (for cancel)
    original_content: Option<String>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing a cell directly in the grid.
    pub fn start_cell_edit(&mut self, position: CellPosition, initial_content: String) {
        self.original_content = Some(initial_content.clone());
        self.mode = EditMode::CellEditing {
            position,
            content: initial_content,
        };
    }

    /// Start editing in the multi-line editor pane.
    pub fn start_editor_edit(&mut self, position: CellPosition, initial_content: String) {
        self.original_content = Some(initial_content.clone());
        self.mode = EditMode::EditorPane {
            position,
            content: initial_content,
        };
    }

    /// Update the content being edited.
    pub fn update_value(&mut self, new_content: String) -> Result<(), String> {
        match &mut self.mode {
            EditMode::Viewing => Err("Cannot update value while in viewing mode".to_string()),
            EditMode::CellEditing { content, .. } => {
                *content = new_content;
                Ok(())
            }
            EditMode::EditorPane { content, .. } => {
                *content = new_content;
                Ok(())
            }
        }
    }

    /// Append a character to the content being edited. No-op while viewing.
    pub fn push_char(&mut self, ch: char) {
        match &mut self.mode {
            EditMode::Viewing => {}
            EditMode::CellEditing { content, .. } | EditMode::EditorPane { content, .. } => {
                content.push(ch);
            }
        }
    }

    /// Remove the last character of the content being edited.
    pub fn pop_char(&mut self) {
        match &mut self.mode {
            EditMode::Viewing => {}
            EditMode::CellEditing { content, .. } | EditMode::EditorPane { content, .. } => {
                content.pop();
            }
        }
    }

    /// Commit the current edit: returns the position and new content to be
    /// written to the sheet, and reverts to viewing.
    pub fn commit(&mut self) -> Option<(CellPosition, String)> {
        match std::mem::take(&mut self.mode) {
            EditMode::Viewing => None,
            EditMode::CellEditing { position, content }
            | EditMode::EditorPane { position, content } => {
                self.original_content = None;
                Some((position, content))
            }
        }
    }

    /// Cancel the current edit and return the original content.
    pub fn cancel(&mut self) -> Option<String> {
        if self.mode.is_editing() {
            self.mode = EditMode::Viewing;
            self.original_content.take()
        } else {
            None
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }
}
