pub mod edit;
pub mod focus;
pub mod input;
pub mod viewport;

pub use edit::{EditMode, EditState};
pub use focus::FocusState;
pub use input::{is_navigation_action, key_to_action, InputAction, Key, Modifiers};
pub use viewport::{ViewportState, VisibleRange};

use serde::{Deserialize, Serialize};

use crate::position::CellPosition;

/// Interaction state of the grid: focus, edit lifecycle, and scroll window.
///
/// This is pure state, owned by the controller. Actions that need the sheet
/// contents (starting an edit, structural changes, file I/O) are handled by
/// the controller; [`handle_action`](GridState::handle_action) covers
/// navigation only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    pub focus: FocusState,
    pub edit: EditState,
    pub viewport: ViewportState,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport_size(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            focus: FocusState::new(),
            edit: EditState::new(),
            viewport: ViewportState::new(visible_rows, visible_cols),
        }
    }

    /// Handle a navigation action against a `rows` x `cols` grid.
    ///
    /// Returns the cell that lost focus, so the caller can run its focus-out
    /// handling (write-back and re-render).
    pub fn handle_action(
        &mut self,
        action: &InputAction,
        rows: usize,
        cols: usize,
    ) -> Option<CellPosition> {
        let previous = self.focus.current();
        match action {
            InputAction::MoveUp => self.move_focus(-1, 0, rows, cols),
            InputAction::MoveDown => self.move_focus(1, 0, rows, cols),
            InputAction::MoveLeft => self.move_focus(0, -1, rows, cols),
            InputAction::MoveRight => self.move_focus(0, 1, rows, cols),
            InputAction::MoveToStart => {
                let row = self.focus.current().map_or(0, |p| p.row);
                self.jump_focus(CellPosition::new(row, 0));
            }
            InputAction::MoveToEnd => {
                let row = self.focus.current().map_or(0, |p| p.row);
                self.jump_focus(CellPosition::new(row, cols - 1));
            }
            InputAction::MoveToTop => self.jump_focus(CellPosition::origin()),
            InputAction::MoveToBottom => self.jump_focus(CellPosition::new(rows - 1, cols - 1)),
            InputAction::PageUp => {
                let (page, _) = self.viewport.dimensions();
                self.move_focus(-(page as isize), 0, rows, cols);
            }
            InputAction::PageDown => {
                let (page, _) = self.viewport.dimensions();
                self.move_focus(page as isize, 0, rows, cols);
            }
            _ => return None,
        }
        match (previous, self.focus.current()) {
            (Some(old), Some(new)) if old != new => Some(old),
            _ => None,
        }
    }

    /// Re-clamp focus and scroll after the grid shape changed.
    pub fn clamp_to(&mut self, rows: usize, cols: usize) {
        self.focus.clamp_to(rows, cols);
        self.viewport.clamp_to(rows, cols);
        if let Some(pos) = self.focus.current() {
            self.viewport.ensure_cell_visible(pos);
        }
    }

    pub fn current_cell(&self) -> Option<CellPosition> {
        self.focus.current()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.viewport.visible_range()
    }

    fn move_focus(&mut self, delta_row: isize, delta_col: isize, rows: usize, cols: usize) {
        let pos = self.focus.move_by(delta_row, delta_col, rows, cols);
        self.viewport.ensure_cell_visible(pos);
    }

    fn jump_focus(&mut self, pos: CellPosition) {
        self.focus.select(pos);
        self.viewport.ensure_cell_visible(pos);
    }
}
