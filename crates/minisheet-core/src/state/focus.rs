use serde::{Deserialize, Serialize};

use crate::position::CellPosition;

/// Controller-owned current-cell focus.
///
/// Selecting a cell is the "focus in" event; clearing (or moving to another
/// cell) is "focus out". The sheet itself carries no notion of selection, so
/// a wholesale data replacement simply leaves the controller to clear this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusState {
    current: Option<CellPosition>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently focused cell, if any.
    pub fn current(&self) -> Option<CellPosition> {
        self.current
    }

    /// Focus a cell. Returns the previously focused cell so the caller can
    /// run its focus-out handling.
    pub fn select(&mut self, pos: CellPosition) -> Option<CellPosition> {
        self.current.replace(pos)
    }

    /// Drop focus entirely, returning the cell that lost it.
    pub fn clear(&mut self) -> Option<CellPosition> {
        self.current.take()
    }

    pub fn is_focused(&self, pos: CellPosition) -> bool {
        self.current == Some(pos)
    }

    /// Move the focus by a row/column delta, clamped to a `rows` x `cols`
    /// grid. With nothing focused, movement lands on the origin. Returns the
    /// new position.
    pub fn move_by(&mut self, delta_row: isize, delta_col: isize, rows: usize, cols: usize) -> CellPosition {
        let new_pos = match self.current {
            None => CellPosition::origin(),
            Some(current) => {
                let row = (current.row as isize + delta_row).clamp(0, rows as isize - 1) as usize;
                let col = (current.col as isize + delta_col).clamp(0, cols as isize - 1) as usize;
                CellPosition::new(row, col)
            }
        };
        self.current = Some(new_pos);
        new_pos
    }

    /// Re-clamp the focus after a structural change shrank the grid.
    pub fn clamp_to(&mut self, rows: usize, cols: usize) {
        if let Some(current) = self.current {
            self.current = Some(CellPosition::new(
                current.row.min(rows - 1),
                current.col.min(cols - 1),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_focus() {
        let focus = FocusState::new();
        assert_eq!(focus.current(), None);
    }

    #[test]
    fn test_select_returns_previous() {
        let mut focus = FocusState::new();
        assert_eq!(focus.select(CellPosition::new(1, 1)), None);
        assert_eq!(
            focus.select(CellPosition::new(2, 2)),
            Some(CellPosition::new(1, 1))
        );
        assert!(focus.is_focused(CellPosition::new(2, 2)));
    }

    #[test]
    fn test_clear() {
        let mut focus = FocusState::new();
        focus.select(CellPosition::new(0, 3));
        assert_eq!(focus.clear(), Some(CellPosition::new(0, 3)));
        assert_eq!(focus.current(), None);
    }

    #[test]
    fn test_move_clamps_at_edges() {
        let mut focus = FocusState::new();
        focus.select(CellPosition::origin());
        assert_eq!(focus.move_by(-1, -1, 3, 3), CellPosition::origin());
        assert_eq!(focus.move_by(5, 5, 3, 3), CellPosition::new(2, 2));
        assert_eq!(focus.move_by(0, 1, 3, 3), CellPosition::new(2, 2));
    }

    #[test]
    fn test_move_without_focus_lands_on_origin() {
        let mut focus = FocusState::new();
        assert_eq!(focus.move_by(1, 0, 5, 5), CellPosition::origin());
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut focus = FocusState::new();
        focus.select(CellPosition::new(4, 4));
        focus.clamp_to(3, 5);
        assert_eq!(focus.current(), Some(CellPosition::new(2, 4)));
    }
}
