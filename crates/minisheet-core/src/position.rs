use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a cell in the grid (0-indexed, row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

impl fmt::Display for CellPosition {
    /// Formats as the user-facing label, e.g. `(0, 0)` -> `A1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", col_to_label(self.col), self.row + 1)
    }
}

/// Convert column index (0-indexed) to label (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: usize) -> String {
    let mut label = String::new();
    let mut n = col + 1; // 1-indexed for calculation

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    label
}
