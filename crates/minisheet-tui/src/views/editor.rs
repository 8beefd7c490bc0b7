use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
};

/// The secondary multi-line editor pane, mirroring one cell's full content.
///
/// Holds a plain line-based buffer with a character cursor. Content flows
/// one way: the controller loads it from the sheet on selection and writes
/// it back on an explicit apply; the pane never touches the sheet itself.
#[derive(Debug, Clone, Default)]
pub struct EditorView {
    lines: Vec<String>,
    cursor_line: usize,
    /// Cursor position within the line, in characters.
    cursor_col: usize,
}

impl EditorView {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
        }
    }

    /// Replace the buffer with a cell's content, cursor at the end.
    pub fn set_value(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_line = self.lines.len() - 1;
        self.cursor_col = self.lines[self.cursor_line].chars().count();
    }

    /// The buffer content as a single string with `\n` separators.
    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor_line = 0;
        self.cursor_col = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, ch);
        self.cursor_col += 1;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        let rest = line.split_off(at);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    /// Delete the character before the cursor, joining lines at a line start.
    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let line = &mut self.lines[self.cursor_line];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
        } else if self.cursor_line > 0 {
            let removed = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.lines[self.cursor_line].chars().count();
            self.lines[self.cursor_line].push_str(&removed);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.lines[self.cursor_line].chars().count();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.lines[self.cursor_line].chars().count() {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self
                .cursor_col
                .min(self.lines[self.cursor_line].chars().count());
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = self
                .cursor_col
                .min(self.lines[self.cursor_line].chars().count());
        }
    }

    /// Cursor position as (line, character column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    /// Draw the pane starting at screen row `top`, using at most `height`
    /// lines for content. The cursor is shown as a reversed character while
    /// the pane is active.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        top: u16,
        height: usize,
        active: bool,
    ) -> io::Result<()> {
        queue!(
            out,
            MoveTo(0, top),
            SetAttribute(Attribute::Bold),
            Print(if active {
                "Cell Editor (multi-line) [editing]"
            } else {
                "Cell Editor (multi-line)"
            }),
            SetAttribute(Attribute::Reset)
        )?;

        // Keep the cursor's line in view.
        let first = self.cursor_line.saturating_sub(height.saturating_sub(1));
        for (i, line) in self.lines.iter().skip(first).take(height).enumerate() {
            let screen_row = top + 1 + i as u16;
            queue!(out, MoveTo(0, screen_row))?;
            if active && first + i == self.cursor_line {
                self.render_cursor_line(out, line)?;
            } else {
                queue!(out, Print(line.as_str()))?;
            }
        }
        Ok(())
    }

    fn render_cursor_line<W: Write>(&self, out: &mut W, line: &str) -> io::Result<()> {
        let at = byte_index(line, self.cursor_col);
        let (before, rest) = line.split_at(at);
        queue!(out, Print(before))?;
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) => queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(c),
                SetAttribute(Attribute::Reset),
                Print(chars.as_str())
            )?,
            None => queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(' '),
                SetAttribute(Attribute::Reset)
            )?,
        }
        Ok(())
    }
}

/// Byte offset of a character column within a line.
fn byte_index(line: &str, char_col: usize) -> usize {
    line.char_indices()
        .nth(char_col)
        .map_or(line.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let view = EditorView::new();
        assert_eq!(view.value(), "");
        assert_eq!(view.cursor(), (0, 0));
    }

    #[test]
    fn test_set_value_multi_line() {
        let mut view = EditorView::new();
        view.set_value("line1\nline2");
        assert_eq!(view.value(), "line1\nline2");
        assert_eq!(view.cursor(), (1, 5));
    }

    #[test]
    fn test_insert_and_newline() {
        let mut view = EditorView::new();
        view.insert_char('a');
        view.insert_char('b');
        view.insert_newline();
        view.insert_char('c');
        assert_eq!(view.value(), "ab\nc");
        assert_eq!(view.cursor(), (1, 1));
    }

    #[test]
    fn test_newline_splits_line_at_cursor() {
        let mut view = EditorView::new();
        view.set_value("abcd");
        view.move_left();
        view.move_left();
        view.insert_newline();
        assert_eq!(view.value(), "ab\ncd");
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut view = EditorView::new();
        view.set_value("ab\ncd");
        view.move_up(); // (0, 2)
        view.move_down(); // (1, 2)
        view.backspace();
        view.backspace();
        assert_eq!(view.value(), "ab\n");
        view.backspace(); // join
        assert_eq!(view.value(), "ab");
        assert_eq!(view.cursor(), (0, 2));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut view = EditorView::new();
        view.insert_char('x');
        view.move_left();
        view.backspace();
        assert_eq!(view.value(), "x");
    }

    #[test]
    fn test_cursor_movement_across_lines() {
        let mut view = EditorView::new();
        view.set_value("ab\ncde");
        // cursor at (1, 3)
        view.move_right(); // clamped
        assert_eq!(view.cursor(), (1, 3));
        view.move_up();
        assert_eq!(view.cursor(), (0, 2));
        view.move_right();
        assert_eq!(view.cursor(), (1, 0));
        view.move_left();
        assert_eq!(view.cursor(), (0, 2));
    }

    #[test]
    fn test_clear() {
        let mut view = EditorView::new();
        view.set_value("something");
        view.clear();
        assert_eq!(view.value(), "");
        assert_eq!(view.cursor(), (0, 0));
    }

    #[test]
    fn test_multibyte_editing() {
        let mut view = EditorView::new();
        view.set_value("日本");
        view.insert_char('語');
        assert_eq!(view.value(), "日本語");
        view.backspace();
        view.backspace();
        assert_eq!(view.value(), "日");
    }
}
