use crate::error::{FlowError, Result};
use crate::screenflow::models::{FieldKind, Form, Key};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Whether a terminal key code is the named key.
pub fn matches_key(code: KeyCode, key: Key) -> bool {
    match (key, code) {
        (Key::Space, KeyCode::Char(' ')) => true,
        (Key::Return, KeyCode::Enter) => true,
        (Key::Escape, KeyCode::Esc) => true,
        (Key::Char(expected), KeyCode::Char(c)) => c == expected,
        _ => false,
    }
}

/// Ctrl+C; raw mode turns it into a plain key press instead of SIGINT.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Buffers a polled key press for the next input check.
///
/// Ctrl+C is never buffered; it aborts whatever screen is running.
pub fn queue_key(pending: &mut Vec<KeyCode>, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    if is_interrupt(&key) {
        return Err(FlowError::Interrupted);
    }
    pending.push(key.code);
    Ok(())
}

/// Keys that close an acknowledgement dialog.
pub fn dismisses_message(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit,
    Cancel,
}

/// Editing state of a form popup: one buffer per field and the focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub values: Vec<String>,
    pub focus: usize,
}

impl FormState {
    pub fn new(form: &Form) -> FormState {
        FormState {
            values: form.values(),
            focus: 0,
        }
    }

    fn focus_next(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + 1) % self.values.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.values.is_empty() {
            self.focus = (self.focus + self.values.len() - 1) % self.values.len();
        }
    }

    /// Steps a choice field forward or back through its list, wrapping around.
    fn cycle_choice(&mut self, choices: &[String], forward: bool) {
        if choices.is_empty() {
            return;
        }
        let current = choices
            .iter()
            .position(|c| *c == self.values[self.focus])
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % choices.len()
        } else {
            (current + choices.len() - 1) % choices.len()
        };
        self.values[self.focus] = choices[next].clone();
    }

    /// Applies one key press to the form.
    pub fn handle_key(&mut self, form: &Form, key: KeyEvent) -> FormAction {
        if is_interrupt(&key) {
            return FormAction::Cancel;
        }

        match key.code {
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FormAction::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                return FormAction::Continue;
            }
            _ => {}
        }

        let Some(field) = form.fields.get(self.focus) else {
            return FormAction::Continue;
        };
        match &field.kind {
            FieldKind::Entry => match key.code {
                KeyCode::Char(c) => self.values[self.focus].push(c),
                KeyCode::Backspace => {
                    self.values[self.focus].pop();
                }
                _ => {}
            },
            FieldKind::Choice(choices) => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_choice(choices, true),
                KeyCode::Left => self.cycle_choice(choices, false),
                _ => {}
            },
        }
        FormAction::Continue
    }
}
