use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
};
use unicode_width::UnicodeWidthStr;

use minisheet_core::position::{col_to_label, CellPosition};
use minisheet_core::state::{EditMode, GridState};
use minisheet_core::{truncate_with_ellipsis, Sheet};

/// Width of the row-number gutter in characters.
const GUTTER_WIDTH: usize = 4;

/// Projection of the sheet as display strings, one per cell.
///
/// Derived, never authoritative: the sheet is the single source of truth and
/// this projection is rebuilt wholesale on every structural change (row or
/// column add/remove, file open). Cells show truncated text except the one
/// currently being edited, which shows its full content.
#[derive(Debug, Clone)]
pub struct GridView {
    cells: Vec<Vec<String>>,
    display_limit: usize,
}

impl GridView {
    pub fn new(display_limit: usize) -> Self {
        Self {
            cells: Vec::new(),
            display_limit,
        }
    }

    /// Rebuild the whole projection from the sheet.
    pub fn rebuild(&mut self, sheet: &Sheet) {
        let (rows, cols) = sheet.shape();
        self.cells = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| truncate_with_ellipsis(sheet.get(r, c), self.display_limit))
                    .collect()
            })
            .collect();
    }

    /// Re-render a single cell: full text while it is being edited,
    /// truncated otherwise.
    pub fn refresh_cell(&mut self, pos: CellPosition, full_text: &str, editing: bool) {
        if let Some(cell) = self.cells.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
            *cell = if editing {
                full_text.to_string()
            } else {
                truncate_with_ellipsis(full_text, self.display_limit)
            };
        }
    }

    /// The display string for a cell, or `""` outside the projection.
    pub fn display(&self, row: usize, col: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    pub fn shape(&self) -> (usize, usize) {
        let rows = self.cells.len();
        let cols = self.cells.first().map_or(0, Vec::len);
        (rows, cols)
    }

    /// On-screen width of one cell column.
    pub fn cell_width(&self) -> usize {
        self.display_limit + 1
    }

    /// Draw the visible portion of the grid starting at screen row `top`.
    /// Returns the number of terminal lines used.
    pub fn render<W: Write>(&self, out: &mut W, state: &GridState, top: u16) -> io::Result<u16> {
        let (rows, cols) = self.shape();
        let range = state.visible_range();
        let width = self.cell_width();

        // Column header: A, B, C, ...
        queue!(out, MoveTo(0, top), SetAttribute(Attribute::Bold))?;
        queue!(out, Print(" ".repeat(GUTTER_WIDTH + 1)))?;
        for col in range.first_col..=range.last_col.min(cols.saturating_sub(1)) {
            queue!(out, Print(pad_to(&col_to_label(col), width)))?;
        }
        queue!(out, SetAttribute(Attribute::Reset))?;

        let mut line = 1u16;
        for row in range.first_row..=range.last_row.min(rows.saturating_sub(1)) {
            queue!(out, MoveTo(0, top + line))?;
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(format!("{:>gutter$} ", row + 1, gutter = GUTTER_WIDTH)),
                SetAttribute(Attribute::Reset)
            )?;
            for col in range.first_col..=range.last_col.min(cols.saturating_sub(1)) {
                let pos = CellPosition::new(row, col);
                let text = self.cell_text(pos, state, width);
                if state.focus.is_focused(pos) {
                    queue!(
                        out,
                        SetAttribute(Attribute::Reverse),
                        Print(text),
                        SetAttribute(Attribute::Reset)
                    )?;
                } else {
                    queue!(out, Print(text))?;
                }
            }
            line += 1;
        }
        Ok(line)
    }

    /// The padded text to draw for one cell, accounting for an in-progress
    /// in-cell edit (tail of the buffer stays visible).
    fn cell_text(&self, pos: CellPosition, state: &GridState, width: usize) -> String {
        if let EditMode::CellEditing { position, content } = state.edit.mode() {
            if *position == pos {
                let visible: String = tail_chars(content, width.saturating_sub(1));
                return pad_to(&visible, width);
            }
        }
        pad_to(self.display(pos.row, pos.col), width)
    }
}

/// Pad a string with spaces to an on-screen width (never cuts).
fn pad_to(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    if used < width {
        out.push_str(&" ".repeat(width - used));
    }
    out
}

/// Last `n` characters of a string, with newlines flattened for single-line
/// cell display.
fn tail_chars(s: &str, n: usize) -> String {
    let flat: String = s.chars().map(|c| if c == '\n' { '\u{21b5}' } else { c }).collect();
    let count = flat.chars().count();
    flat.chars().skip(count.saturating_sub(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> Sheet {
        let mut sheet = Sheet::new(2, 2);
        sheet.set(0, 0, "short");
        sheet.set(0, 1, "a rather long cell value");
        sheet
    }

    #[test]
    fn test_rebuild_truncates_for_display() {
        let mut view = GridView::new(8);
        view.rebuild(&sample_sheet());
        assert_eq!(view.shape(), (2, 2));
        assert_eq!(view.display(0, 0), "short");
        assert_eq!(view.display(0, 1), "a rat...");
        assert_eq!(view.display(1, 0), "");
    }

    #[test]
    fn test_refresh_cell_editing_shows_full_text() {
        let mut view = GridView::new(8);
        view.rebuild(&sample_sheet());
        let pos = CellPosition::new(0, 1);
        view.refresh_cell(pos, "a rather long cell value", true);
        assert_eq!(view.display(0, 1), "a rather long cell value");
        view.refresh_cell(pos, "a rather long cell value", false);
        assert_eq!(view.display(0, 1), "a rat...");
    }

    #[test]
    fn test_refresh_cell_out_of_projection_is_ignored() {
        let mut view = GridView::new(8);
        view.rebuild(&sample_sheet());
        view.refresh_cell(CellPosition::new(9, 9), "x", false);
        assert_eq!(view.shape(), (2, 2));
    }

    #[test]
    fn test_pad_to_uses_display_width() {
        assert_eq!(pad_to("ab", 4), "ab  ");
        // CJK chars are double-width on screen
        assert_eq!(pad_to("日本", 6), "日本  ");
        assert_eq!(pad_to("toolong", 3), "toolong");
    }

    #[test]
    fn test_tail_chars_flattens_newlines() {
        assert_eq!(tail_chars("ab\ncd", 10), "ab\u{21b5}cd");
        assert_eq!(tail_chars("abcdef", 3), "def");
    }
}
