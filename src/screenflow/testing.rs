//! In-memory presentation layer for unit tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{FlowError, Result};
use crate::screenflow::models::{Form, Key, TextStyle};
use crate::screenflow::window::{Clock, DialogService, InputSource, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Stim {
    Text(String),
    Image(PathBuf, (i16, i16)),
}

/// Records every flipped frame. Keys "arrive" after a fixed number of polls.
#[derive(Debug, Default)]
pub struct FakeWindow {
    pub frames: Vec<Vec<Stim>>,
    pending: Vec<Stim>,
    pub closed: bool,
    pub polls: usize,
    /// (poll number, key) pairs; poll numbers are 1-based
    pub presses: Vec<(usize, Key)>,
}

impl FakeWindow {
    pub fn new() -> FakeWindow {
        FakeWindow::default()
    }

    pub fn pressing(key: Key, on_poll: usize) -> FakeWindow {
        FakeWindow::with_presses(&[(on_poll, key)])
    }

    pub fn with_presses(presses: &[(usize, Key)]) -> FakeWindow {
        FakeWindow {
            presses: presses.to_vec(),
            ..FakeWindow::default()
        }
    }

    /// Text of every frame's first stimulus.
    pub fn texts(&self) -> Vec<String> {
        self.frames
            .iter()
            .filter_map(|frame| match frame.first() {
                Some(Stim::Text(text)) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn poll(&mut self) -> Option<Key> {
        self.polls += 1;
        self.presses
            .iter()
            .find(|(poll, _)| *poll == self.polls)
            .map(|(_, key)| *key)
    }
}

impl Surface for FakeWindow {
    fn draw_text(&mut self, text: &str, _style: &TextStyle) -> Result<()> {
        self.pending.push(Stim::Text(text.to_string()));
        Ok(())
    }

    fn draw_image(&mut self, path: &Path, position: (i16, i16)) -> Result<()> {
        self.pending.push(Stim::Image(path.to_path_buf(), position));
        Ok(())
    }

    fn flip(&mut self) -> Result<()> {
        if self.closed {
            return Err(FlowError::SurfaceClosed);
        }
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

impl InputSource for FakeWindow {
    fn key_pressed(&mut self, key: Key) -> Result<bool> {
        Ok(self.poll() == Some(key))
    }

    fn any_key_pressed(&mut self) -> Result<bool> {
        Ok(self.poll().is_some())
    }
}

/// Clock that only moves when asked to: by `sleep`, and by `step` on every `now`.
pub struct FakeClock {
    base: Instant,
    offset: Cell<Duration>,
    step: Duration,
}

impl FakeClock {
    pub fn new(step: Duration) -> FakeClock {
        FakeClock {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            step,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        let now = self.base + self.offset.get();
        self.offset.set(self.offset.get() + self.step);
        now
    }

    fn sleep(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
    }
}

/// Replays scripted form submissions; an exhausted script behaves like a cancel.
#[derive(Debug, Default)]
pub struct FakeDialogs {
    pub submissions: VecDeque<Option<Vec<String>>>,
    pub shown_forms: Vec<Form>,
    pub messages: Vec<Vec<String>>,
}

impl FakeDialogs {
    pub fn submitting(submissions: &[&[&str]]) -> FakeDialogs {
        FakeDialogs {
            submissions: submissions
                .iter()
                .map(|values| Some(values.iter().map(|v| v.to_string()).collect()))
                .collect(),
            ..FakeDialogs::default()
        }
    }
}

impl DialogService for FakeDialogs {
    fn show_form(&mut self, form: &Form) -> Result<Option<Vec<String>>> {
        self.shown_forms.push(form.clone());
        Ok(self.submissions.pop_front().flatten())
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        self.messages
            .push(lines.iter().map(|line| line.to_string()).collect());
        Ok(())
    }
}
