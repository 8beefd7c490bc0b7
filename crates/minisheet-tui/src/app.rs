use std::io::{self, BufWriter, Stdout, Write};
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use minisheet_core::state::{key_to_action, InputAction, Key, Modifiers};

use crate::controller::{Controller, Outcome};

/// Content lines of the editor pane.
const EDITOR_HEIGHT: usize = 6;
/// Lines not available to the grid: title, column header, separator, editor
/// label and content, status line.
const CHROME_LINES: usize = 5 + EDITOR_HEIGHT;
/// Row-number gutter plus its trailing space.
const GUTTER_COLS: usize = 5;

/// Which surface receives plain keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Grid,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Open,
    SaveAs,
}

/// One-line path prompt shown in place of the status line.
#[derive(Debug)]
struct Prompt {
    kind: PromptKind,
    input: String,
}

/// The terminal application: raw-mode lifecycle, key decoding and the draw
/// cycle around a [`Controller`].
pub struct App {
    controller: Controller,
    pane: Pane,
    prompt: Option<Prompt>,
    should_quit: bool,
}

/// Restores the terminal even when the event loop errors out.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl App {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            pane: Pane::Grid,
            prompt: None,
            should_quit: false,
        }
    }

    /// Run until quit. Blocks on the event stream; all work happens in
    /// response to discrete user input on this one thread.
    pub fn run(mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut out = BufWriter::new(io::stdout());

        while !self.should_quit {
            self.fit_viewport()?;
            self.draw(&mut out)?;
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
                _ => {}
            }
        }
        Ok(())
    }

    /// Size the grid viewport to the terminal, leaving room for the chrome.
    fn fit_viewport(&mut self) -> Result<()> {
        let (width, height) = terminal::size()?;
        let visible_rows = (height as usize).saturating_sub(CHROME_LINES).max(1);
        let cell_width = self.controller.grid.cell_width();
        let visible_cols = ((width as usize).saturating_sub(GUTTER_COLS) / cell_width).max(1);
        self.controller
            .state
            .viewport
            .set_dimensions(visible_rows, visible_cols);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }
        match self.pane {
            Pane::Grid => self.handle_grid_key(key),
            Pane::Editor => self.handle_editor_key(key),
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        let (code, modifiers) = decode_key(key);
        let action = key_to_action(code, modifiers);
        if action == InputAction::FocusEditor {
            if self.controller.focus_editor() {
                self.pane = Pane::Editor;
                self.controller.set_status("Editing cell in the editor pane.");
            }
            return;
        }
        match self.controller.handle_action(action) {
            Outcome::Continue => {}
            Outcome::Quit => self.should_quit = true,
            Outcome::PromptOpen => {
                self.prompt = Some(Prompt {
                    kind: PromptKind::Open,
                    input: String::new(),
                });
            }
            Outcome::PromptSaveAs => {
                let input = self
                    .controller
                    .current_path
                    .as_ref()
                    .map_or_else(String::new, |p| p.display().to_string());
                self.prompt = Some(Prompt {
                    kind: PromptKind::SaveAs,
                    input,
                });
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let (code, modifiers) = decode_key(key);
        // Shortcuts keep working inside the pane.
        match key_to_action(code, modifiers) {
            InputAction::ApplyEditor => {
                self.controller.apply_from_editor();
                return;
            }
            InputAction::ClearEditor => {
                self.controller.editor.clear();
                return;
            }
            InputAction::FocusEditor | InputAction::CancelEdit => {
                self.controller.leave_editor();
                self.pane = Pane::Grid;
                return;
            }
            InputAction::Quit => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }
        match code {
            Key::Char(c) if modifiers.none_pressed() || modifiers.only_shift() => {
                self.controller.editor.insert_char(c);
            }
            Key::Enter => self.controller.editor.insert_newline(),
            Key::Backspace => self.controller.editor.backspace(),
            Key::ArrowLeft => self.controller.editor.move_left(),
            Key::ArrowRight => self.controller.editor.move_right(),
            Key::ArrowUp => self.controller.editor.move_up(),
            Key::ArrowDown => self.controller.editor.move_down(),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.controller.set_status("Cancelled.");
            }
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.push(c);
                }
            }
            KeyCode::Enter => {
                let Some(prompt) = self.prompt.take() else {
                    return;
                };
                let path = PathBuf::from(prompt.input.trim());
                if path.as_os_str().is_empty() {
                    self.controller.set_status("Cancelled.");
                    return;
                }
                match prompt.kind {
                    PromptKind::Open => self.controller.open(&path),
                    PromptKind::SaveAs => {
                        self.controller.save_to(&path);
                    }
                }
            }
            _ => {}
        }
    }

    fn draw(&mut self, out: &mut BufWriter<Stdout>) -> Result<()> {
        let (_, height) = terminal::size()?;
        queue!(out, Clear(ClearType::All))?;

        // Title
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print(format!("minisheet - {}", self.controller.title())),
            SetAttribute(Attribute::Reset)
        )?;

        // Grid with headers
        let grid_lines = self
            .controller
            .grid
            .render(out, &self.controller.state, 1)?;

        // Editor pane below the grid
        let editor_top = 1 + grid_lines + 1;
        self.controller
            .editor
            .render(out, editor_top, EDITOR_HEIGHT, self.pane == Pane::Editor)?;

        // Status line (or the path prompt) at the bottom
        let bottom = height.saturating_sub(1);
        queue!(out, cursor::MoveTo(0, bottom))?;
        match &self.prompt {
            Some(prompt) => {
                let label = match prompt.kind {
                    PromptKind::Open => "Open CSV",
                    PromptKind::SaveAs => "Save CSV as",
                };
                queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(format!("{label}: {}", prompt.input)),
                    SetAttribute(Attribute::Reset)
                )?;
            }
            None => {
                queue!(out, Print(self.controller.status()))?;
            }
        }

        out.flush()?;
        Ok(())
    }
}

/// Translate a crossterm key event into the core key model.
fn decode_key(key: KeyEvent) -> (Key, Modifiers) {
    let mut modifiers = Modifiers::new()
        .with_shift(key.modifiers.contains(KeyModifiers::SHIFT))
        .with_ctrl(key.modifiers.contains(KeyModifiers::CONTROL))
        .with_alt(key.modifiers.contains(KeyModifiers::ALT));

    let code = match key.code {
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers = modifiers.with_shift(true);
            Key::Tab
        }
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Unknown,
    };
    (code, modifiers)
}
