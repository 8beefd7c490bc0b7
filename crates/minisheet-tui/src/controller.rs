use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use minisheet_core::position::CellPosition;
use minisheet_core::state::{EditMode, GridState, InputAction, ViewportState};
use minisheet_core::Sheet;

use crate::views::{EditorView, GridView};

/// Default character limit for truncated cell display.
pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

/// What the event loop should do after an action was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Ask the user for a path to open.
    PromptOpen,
    /// Ask the user for a path to save to.
    PromptSaveAs,
    Quit,
}

/// Mediates between the sheet, the grid view and the editor pane.
///
/// Owns the authoritative [`Sheet`], the interaction state and both view
/// projections. All mutations flow through here: views never write to the
/// sheet, and every structural change rebuilds the grid projection from the
/// sheet's current contents.
pub struct Controller {
    pub sheet: Sheet,
    pub state: GridState,
    pub grid: GridView,
    pub editor: EditorView,
    pub current_path: Option<PathBuf>,
    status: String,
}

impl Controller {
    pub fn new(sheet: Sheet, display_limit: usize) -> Self {
        let mut grid = GridView::new(display_limit);
        grid.rebuild(&sheet);
        Self {
            sheet,
            state: GridState::new(),
            grid,
            editor: EditorView::new(),
            current_path: None,
            status: "Ready".to_string(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Title line: file name (or "Untitled") plus the sheet shape.
    pub fn title(&self) -> String {
        let name = self
            .current_path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "Untitled".to_string(), |n| n.to_string_lossy().into_owned());
        let (rows, cols) = self.sheet.shape();
        format!("{name}  ({rows} x {cols})")
    }

    /// Handle a grid-context action.
    pub fn handle_action(&mut self, action: InputAction) -> Outcome {
        match action {
            InputAction::Quit => return Outcome::Quit,
            InputAction::Open => return Outcome::PromptOpen,
            InputAction::SaveAs => return Outcome::PromptSaveAs,
            InputAction::Save => match self.current_path.clone() {
                Some(path) => {
                    self.save_to(&path);
                }
                None => return Outcome::PromptSaveAs,
            },

            InputAction::StartEdit | InputAction::ConfirmEdit if !self.state.is_editing() => {
                self.start_edit_full();
            }
            InputAction::ConfirmEdit => self.commit_cell_edit(),
            InputAction::CancelEdit => self.cancel_cell_edit(),
            InputAction::InsertChar(ch) => {
                if self.state.is_editing() {
                    self.state.edit.push_char(ch);
                } else {
                    self.start_edit_replace(ch);
                }
            }
            InputAction::Backspace => {
                if self.state.is_editing() {
                    self.state.edit.pop_char();
                } else if let Some(pos) = self.state.current_cell() {
                    // Clear the focused cell while viewing.
                    self.write_cell(pos, String::new());
                }
            }

            InputAction::AddRow => {
                self.sheet.add_row_end();
                self.after_structural_change("Added row");
            }
            InputAction::DelRow => {
                if self.sheet.del_row_end() {
                    self.after_structural_change("Removed row");
                } else {
                    self.status = "Cannot remove the last row.".to_string();
                }
            }
            InputAction::AddCol => {
                self.sheet.add_col_end();
                self.after_structural_change("Added column");
            }
            InputAction::DelCol => {
                if self.sheet.del_col_end() {
                    self.after_structural_change("Removed column");
                } else {
                    self.status = "Cannot remove the last column.".to_string();
                }
            }

            InputAction::ApplyEditor => self.apply_from_editor(),
            InputAction::ClearEditor => self.editor.clear(),

            other if minisheet_core::state::is_navigation_action(&other) => {
                // Moving focus away is the focus-out event: commit first.
                self.commit_cell_edit();
                let (rows, cols) = self.sheet.shape();
                self.state.handle_action(&other, rows, cols);
                self.mirror_editor_from_focus();
            }

            _ => {}
        }
        Outcome::Continue
    }

    /// Move editing into the editor pane for the focused cell. Returns
    /// whether the pane took focus.
    pub fn focus_editor(&mut self) -> bool {
        self.commit_cell_edit();
        let Some(pos) = self.state.current_cell() else {
            self.status = "No cell selected.".to_string();
            return false;
        };
        let content = self.sheet.get(pos.row, pos.col).to_string();
        self.editor.set_value(&content);
        self.state.edit.start_editor_edit(pos, content);
        true
    }

    /// Leave the editor pane without applying.
    pub fn leave_editor(&mut self) {
        if self.state.edit.mode().is_editor_pane() {
            self.state.edit.cancel();
        }
    }

    /// Write the editor pane's content into the current cell.
    pub fn apply_from_editor(&mut self) {
        let Some(pos) = self.state.current_cell() else {
            self.status = "No cell selected.".to_string();
            return;
        };
        let text = self.editor.value();
        if self.state.edit.mode().is_editor_pane() {
            // Route the write through the edit lifecycle, then re-arm it so
            // the pane stays live for further edits.
            let _ = self.state.edit.update_value(text.clone());
            if let Some((pos, text)) = self.state.edit.commit() {
                self.sheet.set(pos.row, pos.col, text.clone());
                self.grid.refresh_cell(pos, &text, false);
                self.state.edit.start_editor_edit(pos, text);
            }
        } else {
            self.sheet.set(pos.row, pos.col, text.clone());
            let editing = matches!(
                self.state.edit.mode(),
                EditMode::CellEditing { position, .. } if *position == pos
            );
            if editing {
                // Keep the in-progress buffer in sync with the applied value.
                let _ = self.state.edit.update_value(text.clone());
            }
            self.grid.refresh_cell(pos, &text, editing);
        }
        self.status = format!("Updated cell ({}, {}) from editor.", pos.row + 1, pos.col + 1);
        debug!(row = pos.row, col = pos.col, "applied editor content");
    }

    /// Load a CSV file, replacing the sheet wholesale.
    ///
    /// On failure nothing changes: the sheet, the focus and the current path
    /// all stay as they were.
    pub fn open(&mut self, path: &Path) {
        let data = match minisheet_csv::load(path) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "open failed");
                self.status = format!("Open CSV failed: {err}");
                return;
            }
        };
        self.state.edit.cancel();
        self.state.focus.clear();
        let (visible_rows, visible_cols) = self.state.viewport.dimensions();
        self.state.viewport = ViewportState::new(visible_rows, visible_cols);
        self.sheet.replace_all(data);
        self.editor.clear();
        self.grid.rebuild(&self.sheet);
        self.current_path = Some(path.to_path_buf());
        self.status = format!("Opened: {}", path.display());
        info!(path = %path.display(), shape = ?self.sheet.shape(), "opened file");
    }

    /// Save to a path and remember it. On failure the current path is left
    /// unchanged. Returns whether the write succeeded.
    pub fn save_to(&mut self, path: &Path) -> bool {
        if let Err(err) = minisheet_csv::save(path, &self.sheet.to_rows()) {
            warn!(path = %path.display(), error = %err, "save failed");
            self.status = format!("Save CSV failed: {err}");
            return false;
        }
        self.current_path = Some(path.to_path_buf());
        self.status = format!("Saved: {}", path.display());
        info!(path = %path.display(), "saved file");
        true
    }

    /// Start editing the focused cell with its full content (the grid cell
    /// switches from truncated to full display).
    fn start_edit_full(&mut self) {
        if let Some(pos) = self.state.current_cell() {
            let content = self.sheet.get(pos.row, pos.col).to_string();
            self.grid.refresh_cell(pos, &content, true);
            self.state.edit.start_cell_edit(pos, content);
        }
    }

    /// Start editing the focused cell, replacing its content with one typed
    /// character.
    fn start_edit_replace(&mut self, ch: char) {
        if let Some(pos) = self.state.current_cell() {
            self.state.edit.start_cell_edit(pos, String::new());
            self.state.edit.push_char(ch);
        }
    }

    /// Focus-out write-back: commit a pending in-cell edit to the sheet and
    /// re-render that cell truncated.
    fn commit_cell_edit(&mut self) {
        if let Some((pos, content)) = self.state.edit.commit() {
            self.write_cell(pos, content);
        }
    }

    fn cancel_cell_edit(&mut self) {
        let pos = self.state.edit.mode().position();
        if self.state.edit.cancel().is_some() {
            if let Some(pos) = pos {
                let content = self.sheet.get(pos.row, pos.col).to_string();
                self.grid.refresh_cell(pos, &content, false);
            }
        }
    }

    fn write_cell(&mut self, pos: CellPosition, content: String) {
        self.sheet.set(pos.row, pos.col, content.clone());
        self.grid.refresh_cell(pos, &content, false);
        if self.state.focus.is_focused(pos) {
            self.editor.set_value(&content);
        }
        debug!(row = pos.row, col = pos.col, "cell written");
    }

    /// Focus-in mirroring: load the focused cell's full content into the
    /// editor pane.
    fn mirror_editor_from_focus(&mut self) {
        if let Some(pos) = self.state.current_cell() {
            self.editor.set_value(self.sheet.get(pos.row, pos.col));
        }
    }

    /// Rebuild the projection and re-clamp interaction state after the sheet
    /// shape changed.
    fn after_structural_change(&mut self, what: &str) {
        self.state.edit.cancel();
        let (rows, cols) = self.sheet.shape();
        self.state.clamp_to(rows, cols);
        self.grid.rebuild(&self.sheet);
        self.mirror_editor_from_focus();
        self.status = format!("{what}; sheet is now {rows} x {cols}.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minisheet_core::state::Key;
    use minisheet_core::state::Modifiers;

    fn controller() -> Controller {
        let mut sheet = Sheet::new(3, 3);
        sheet.set(0, 0, "alpha");
        sheet.set(1, 1, "a value long enough to truncate");
        Controller::new(sheet, DEFAULT_DISPLAY_LIMIT)
    }

    #[test]
    fn test_title_untitled() {
        let ctrl = controller();
        assert_eq!(ctrl.title(), "Untitled  (3 x 3)");
    }

    #[test]
    fn test_apply_with_no_selection_is_rejected() {
        let mut ctrl = controller();
        ctrl.editor.set_value("new content");
        ctrl.apply_from_editor();
        assert_eq!(ctrl.status(), "No cell selected.");
        assert_eq!(ctrl.sheet.get(0, 0), "alpha");
    }

    #[test]
    fn test_apply_from_editor_updates_sheet_and_grid() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown); // focus origin
        ctrl.editor.set_value("multi\nline");
        ctrl.apply_from_editor();
        assert_eq!(ctrl.sheet.get(0, 0), "multi\nline");
        assert_eq!(ctrl.status(), "Updated cell (1, 1) from editor.");
    }

    #[test]
    fn test_focus_in_mirrors_editor() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown); // (0,0)
        assert_eq!(ctrl.editor.value(), "alpha");
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.handle_action(InputAction::MoveRight); // (1,1)
        assert_eq!(ctrl.editor.value(), "a value long enough to truncate");
    }

    #[test]
    fn test_navigation_commits_pending_edit() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown); // focus (0,0)
        ctrl.handle_action(InputAction::InsertChar('x'));
        ctrl.handle_action(InputAction::InsertChar('y'));
        assert!(ctrl.state.is_editing());
        ctrl.handle_action(InputAction::MoveRight); // focus-out commits
        assert!(!ctrl.state.is_editing());
        assert_eq!(ctrl.sheet.get(0, 0), "xy");
        assert_eq!(ctrl.grid.display(0, 0), "xy");
    }

    #[test]
    fn test_typed_char_replaces_cell_content() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown); // (0,0) holds "alpha"
        ctrl.handle_action(InputAction::InsertChar('z'));
        ctrl.handle_action(InputAction::ConfirmEdit);
        assert_eq!(ctrl.sheet.get(0, 0), "z");
    }

    #[test]
    fn test_enter_starts_then_commits_edit() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.handle_action(InputAction::ConfirmEdit); // start with full content
        assert!(ctrl.state.is_editing());
        ctrl.handle_action(InputAction::InsertChar('!'));
        ctrl.handle_action(InputAction::ConfirmEdit); // commit
        assert_eq!(ctrl.sheet.get(0, 0), "alpha!");
    }

    #[test]
    fn test_cancel_restores_truncated_display() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.handle_action(InputAction::MoveRight); // (1,1), long value
        ctrl.handle_action(InputAction::ConfirmEdit);
        assert_eq!(ctrl.grid.display(1, 1), "a value long enough to truncate");
        ctrl.handle_action(InputAction::CancelEdit);
        assert_eq!(ctrl.sheet.get(1, 1), "a value long enough to truncate");
        assert_eq!(ctrl.grid.display(1, 1), "a value long enou...");
    }

    #[test]
    fn test_backspace_while_viewing_clears_cell() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown); // (0,0)
        ctrl.handle_action(InputAction::Backspace);
        assert_eq!(ctrl.sheet.get(0, 0), "");
        assert_eq!(ctrl.editor.value(), "");
    }

    #[test]
    fn test_structural_change_rebuilds_projection() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::AddCol);
        assert_eq!(ctrl.sheet.shape(), (3, 4));
        assert_eq!(ctrl.grid.shape(), (3, 4));
        assert_eq!(ctrl.grid.display(0, 3), "");
    }

    #[test]
    fn test_del_below_minimum_is_status_not_mutation() {
        let mut ctrl = Controller::new(Sheet::new(1, 3), DEFAULT_DISPLAY_LIMIT);
        ctrl.handle_action(InputAction::DelRow);
        assert_eq!(ctrl.sheet.shape(), (1, 3));
        assert_eq!(ctrl.status(), "Cannot remove the last row.");
    }

    #[test]
    fn test_shrink_reclamps_focus() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveToBottom); // (2,2)
        ctrl.handle_action(InputAction::DelRow);
        ctrl.handle_action(InputAction::DelCol);
        assert_eq!(
            ctrl.state.current_cell(),
            Some(CellPosition::new(1, 1))
        );
    }

    #[test]
    fn test_open_failure_mutates_nothing() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.open(Path::new("/nonexistent/missing.csv"));
        assert!(ctrl.status().starts_with("Open CSV failed:"));
        assert_eq!(ctrl.sheet.get(0, 0), "alpha");
        assert_eq!(ctrl.current_path, None);
        assert_eq!(ctrl.state.current_cell(), Some(CellPosition::origin()));
    }

    #[test]
    fn test_open_replaces_sheet_and_clears_focus() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        file.write_all(b"a,b\nc\n").unwrap();
        file.flush().unwrap();

        ctrl.open(file.path());
        assert_eq!(ctrl.sheet.shape(), (2, 2));
        assert_eq!(ctrl.sheet.get(1, 1), "");
        assert_eq!(ctrl.state.current_cell(), None);
        assert_eq!(ctrl.current_path.as_deref(), Some(file.path()));
        assert_eq!(ctrl.title(), format!(
            "{}  (2 x 2)",
            file.path().file_name().unwrap().to_string_lossy()
        ));
    }

    #[test]
    fn test_save_roundtrip() {
        let mut ctrl = controller();
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ctrl.save_to(file.path()));
        assert_eq!(ctrl.current_path.as_deref(), Some(file.path()));

        let loaded = minisheet_csv::load(file.path()).unwrap();
        assert_eq!(loaded, ctrl.sheet.to_rows());
    }

    #[test]
    fn test_save_failure_keeps_path() {
        let mut ctrl = controller();
        assert!(!ctrl.save_to(Path::new("/nonexistent/dir/out.csv")));
        assert!(ctrl.status().starts_with("Save CSV failed:"));
        assert_eq!(ctrl.current_path, None);
    }

    #[test]
    fn test_save_without_path_prompts() {
        let mut ctrl = controller();
        assert_eq!(ctrl.handle_action(InputAction::Save), Outcome::PromptSaveAs);
    }

    #[test]
    fn test_quit_and_prompts() {
        let mut ctrl = controller();
        assert_eq!(ctrl.handle_action(InputAction::Quit), Outcome::Quit);
        assert_eq!(ctrl.handle_action(InputAction::Open), Outcome::PromptOpen);
        assert_eq!(ctrl.handle_action(InputAction::SaveAs), Outcome::PromptSaveAs);
    }

    #[test]
    fn test_focus_editor_enters_pane_mode() {
        let mut ctrl = controller();
        assert!(!ctrl.focus_editor());
        assert_eq!(ctrl.status(), "No cell selected.");

        ctrl.handle_action(InputAction::MoveDown); // focus (0,0)
        assert!(ctrl.focus_editor());
        assert!(ctrl.state.edit.mode().is_editor_pane());
        assert_eq!(ctrl.editor.value(), "alpha");
    }

    #[test]
    fn test_focus_editor_commits_pending_cell_edit() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.handle_action(InputAction::InsertChar('x'));
        assert!(ctrl.focus_editor());
        assert_eq!(ctrl.sheet.get(0, 0), "x");
        assert_eq!(ctrl.editor.value(), "x");
    }

    #[test]
    fn test_apply_in_pane_mode_commits_and_stays_armed() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.focus_editor();
        ctrl.editor.insert_char('!');
        ctrl.apply_from_editor();
        assert_eq!(ctrl.sheet.get(0, 0), "alpha!");
        assert_eq!(ctrl.grid.display(0, 0), "alpha!");
        // The pane stays live for further edits.
        assert!(ctrl.state.edit.mode().is_editor_pane());
        assert_eq!(ctrl.status(), "Updated cell (1, 1) from editor.");
    }

    #[test]
    fn test_leave_editor_cancels_pane_mode() {
        let mut ctrl = controller();
        ctrl.handle_action(InputAction::MoveDown);
        ctrl.focus_editor();
        ctrl.editor.insert_char('?');
        ctrl.leave_editor();
        assert!(!ctrl.state.is_editing());
        // Nothing was applied.
        assert_eq!(ctrl.sheet.get(0, 0), "alpha");
    }

    #[test]
    fn test_key_mapping_feeds_controller() {
        // End-to-end: raw key -> action -> controller.
        let mut ctrl = controller();
        let action = minisheet_core::key_to_action(Key::ArrowDown, Modifiers::new());
        ctrl.handle_action(action);
        assert_eq!(ctrl.state.current_cell(), Some(CellPosition::origin()));
    }
}
