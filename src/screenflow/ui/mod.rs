//! Terminal presentation layer built on ratatui and crossterm.

pub mod input_handler;
pub mod popups;
pub mod render;

use std::io::{self, Stdout};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tracing::{debug, warn};

use crate::error::{FlowError, Result};
use crate::screenflow::models::{Form, Key, TextStyle};
use crate::screenflow::window::{DialogService, InputSource, Surface};
use input_handler::{FormAction, FormState, dismisses_message, is_interrupt, matches_key, queue_key};
use render::Stim;

fn enter_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

/// Runs `undo` when `result` is an error, then passes `result` on.
fn or_undo<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// A full-screen terminal session acting as surface, keyboard and dialog service.
///
/// Raw mode and the alternate screen are entered on creation and left on
/// `close()` or drop, whichever comes first.
pub struct TuiSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    queued: Vec<Stim>,
    pending_keys: Vec<KeyCode>,
    frame_interval: Duration,
    last_flip: Option<Instant>,
    closed: bool,
}

impl TuiSession {
    pub fn new(frame_interval: Duration) -> io::Result<TuiSession> {
        enable_raw_mode()?;
        let terminal = or_undo(enter_screen(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        Ok(TuiSession {
            terminal,
            queued: Vec::new(),
            pending_keys: Vec::new(),
            frame_interval,
            last_flip: None,
            closed: false,
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(FlowError::SurfaceClosed)
        } else {
            Ok(())
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    /// Moves every key press waiting in the terminal into `pending_keys`.
    /// Fails with `Interrupted` on Ctrl+C.
    fn drain_keys(&mut self) -> Result<()> {
        self.ensure_open()?;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                queue_key(&mut self.pending_keys, key)?;
            }
        }
        Ok(())
    }

    /// Blocks until the next key press.
    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }
}

impl Surface for TuiSession {
    fn draw_text(&mut self, text: &str, style: &TextStyle) -> Result<()> {
        self.ensure_open()?;
        self.queued.push(Stim::Text {
            text: text.to_string(),
            style: style.clone(),
        });
        Ok(())
    }

    fn draw_image(&mut self, path: &Path, position: (i16, i16)) -> Result<()> {
        self.ensure_open()?;
        self.queued.push(Stim::Image {
            path: path.to_path_buf(),
            position,
        });
        Ok(())
    }

    /// Renders the queued stimuli, then waits out the rest of the frame.
    fn flip(&mut self) -> Result<()> {
        // Keys stay buffered; only Ctrl+C is acted on here
        self.drain_keys()?;
        let stims = std::mem::take(&mut self.queued);
        self.terminal.draw(|f| render::draw_stims(f, &stims))?;

        if let Some(last) = self.last_flip {
            let spent = last.elapsed();
            if spent < self.frame_interval {
                thread::sleep(self.frame_interval - spent);
            }
        }
        self.last_flip = Some(Instant::now());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.restore()?;
        debug!("Terminal restored");
        Ok(())
    }
}

impl InputSource for TuiSession {
    fn key_pressed(&mut self, key: Key) -> Result<bool> {
        self.drain_keys()?;
        let pressed = self.pending_keys.iter().any(|code| matches_key(*code, key));
        self.pending_keys.clear();
        Ok(pressed)
    }

    fn any_key_pressed(&mut self) -> Result<bool> {
        self.drain_keys()?;
        let pressed = !self.pending_keys.is_empty();
        self.pending_keys.clear();
        Ok(pressed)
    }
}

impl DialogService for TuiSession {
    fn show_form(&mut self, form: &Form) -> Result<Option<Vec<String>>> {
        self.ensure_open()?;
        let mut state = FormState::new(form);
        loop {
            self.terminal
                .draw(|f| popups::draw_form_popup(f, form, &state))?;
            let key = self.read_key()?;
            match state.handle_key(form, key) {
                FormAction::Continue => {}
                FormAction::Submit => {
                    self.terminal.clear()?;
                    return Ok(Some(state.values));
                }
                FormAction::Cancel => {
                    self.terminal.clear()?;
                    return Ok(None);
                }
            }
        }
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        self.ensure_open()?;
        loop {
            self.terminal
                .draw(|f| popups::draw_message_popup(f, lines))?;
            let key = self.read_key()?;
            if is_interrupt(&key) {
                return Err(FlowError::Interrupted);
            }
            if dismisses_message(key.code) {
                self.terminal.clear()?;
                return Ok(());
            }
        }
    }
}

impl Drop for TuiSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}
