use serde::{Deserialize, Serialize};

use crate::position::CellPosition;

/// The rectangular region of the grid currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl VisibleRange {
    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row >= self.first_row
            && pos.row <= self.last_row
            && pos.col >= self.first_col
            && pos.col <= self.last_col
    }

    pub fn row_count(&self) -> usize {
        self.last_row.saturating_sub(self.first_row) + 1
    }

    pub fn col_count(&self) -> usize {
        self.last_col.saturating_sub(self.first_col) + 1
    }
}

/// Manages the scroll window over the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Top-left corner of the viewport
    scroll_row: usize,
    scroll_col: usize,
    /// Number of visible rows
    visible_rows: usize,
    /// Number of visible columns
    visible_cols: usize,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(20, 10)
    }
}

impl ViewportState {
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            scroll_row: 0,
            scroll_col: 0,
            visible_rows: visible_rows.max(1),
            visible_cols: visible_cols.max(1),
        }
    }

    /// Ensure a cell is visible, scrolling if necessary.
    pub fn ensure_cell_visible(&mut self, pos: CellPosition) {
        if pos.row < self.scroll_row {
            self.scroll_row = pos.row;
        } else if pos.row >= self.scroll_row + self.visible_rows {
            self.scroll_row = pos.row.saturating_sub(self.visible_rows - 1);
        }

        if pos.col < self.scroll_col {
            self.scroll_col = pos.col;
        } else if pos.col >= self.scroll_col + self.visible_cols {
            self.scroll_col = pos.col.saturating_sub(self.visible_cols - 1);
        }
    }

    /// Get the current visible range.
    pub fn visible_range(&self) -> VisibleRange {
        VisibleRange {
            first_row: self.scroll_row,
            last_row: self.scroll_row + self.visible_rows - 1,
            first_col: self.scroll_col,
            last_col: self.scroll_col + self.visible_cols - 1,
        }
    }

    /// Get the scroll position (top-left corner).
    pub fn scroll_position(&self) -> (usize, usize) {
        (self.scroll_row, self.scroll_col)
    }

    /// Get the viewport dimensions.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.visible_rows, self.visible_cols)
    }

    /// Resize the viewport, e.g. after a terminal resize.
    pub fn set_dimensions(&mut self, visible_rows: usize, visible_cols: usize) {
        self.visible_rows = visible_rows.max(1);
        self.visible_cols = visible_cols.max(1);
    }

    /// Pull the scroll position back so it never points past the grid.
    pub fn clamp_to(&mut self, rows: usize, cols: usize) {
        self.scroll_row = self.scroll_row.min(rows.saturating_sub(1));
        self.scroll_col = self.scroll_col.min(cols.saturating_sub(1));
    }
}
