use serde::{Deserialize, Serialize};

/// Default number of rows for a freshly created sheet
pub const DEFAULT_ROWS: usize = 30;
/// Default number of columns for a freshly created sheet
pub const DEFAULT_COLS: usize = 15;

/// A rectangular grid of text cells, the authoritative data model.
///
/// Storage is dense and row-major: every row always has the same column
/// count, and the grid is never smaller than 1x1. Views hold projections of
/// this data and are rebuilt from it; nothing else is a source of truth.
///
/// Out-of-bounds access through [`get`](Sheet::get) or [`set`](Sheet::set)
/// is a contract violation and panics, like slice indexing. Code probing
/// near the edges should use [`try_get`](Sheet::try_get).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    cells: Vec<Vec<String>>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Sheet {
    /// Create a sheet of `rows` x `cols` empty cells.
    ///
    /// Degenerate dimensions are clamped to 1 so the 1x1 minimum holds from
    /// the start.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: vec![vec![String::new(); cols]; rows],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells[0].len()
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Get the text of a cell. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> &str {
        &self.cells[row][col]
    }

    /// Get the text of a cell, or `None` when out of bounds.
    pub fn try_get(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Overwrite a cell. Content is arbitrary text: empty, multi-line, and
    /// embedded delimiters are all legal. Panics when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        self.cells[row][col] = value.into();
    }

    /// Append one row of empty cells at the bottom.
    pub fn add_row_end(&mut self) {
        self.cells.push(vec![String::new(); self.cols()]);
    }

    /// Remove the last row. Returns `false` (no mutation) when only one row
    /// remains.
    pub fn del_row_end(&mut self) -> bool {
        if self.rows() <= 1 {
            return false;
        }
        self.cells.pop();
        true
    }

    /// Append one column of empty cells at the right edge.
    pub fn add_col_end(&mut self) {
        for row in &mut self.cells {
            row.push(String::new());
        }
    }

    /// Remove the last column. Returns `false` (no mutation) when only one
    /// column remains.
    pub fn del_col_end(&mut self) -> bool {
        if self.cols() <= 1 {
            return false;
        }
        for row in &mut self.cells {
            row.pop();
        }
        true
    }

    /// Replace the entire grid, typically after a file open.
    ///
    /// Empty or degenerate input normalizes to a single empty cell. Ragged
    /// input rows are padded with `""` to the widest row so the rectangular
    /// invariant holds for any caller.
    pub fn replace_all(&mut self, data: Vec<Vec<String>>) {
        let max_cols = data.iter().map(Vec::len).max().unwrap_or(0);
        if max_cols == 0 {
            self.cells = vec![vec![String::new()]];
            return;
        }
        self.cells = data
            .into_iter()
            .map(|mut row| {
                row.resize(max_cols, String::new());
                row
            })
            .collect();
    }

    /// Export the grid as a defensive copy; mutating the result does not
    /// affect the sheet.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells.clone()
    }
}
