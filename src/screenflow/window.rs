//! Services the screen-flow procedures need from a presentation layer.
//!
//! The procedures never talk to a terminal or a GPU directly. They draw
//! through a [`Surface`], poll an [`InputSource`], open forms through a
//! [`DialogService`] and read time from a [`Clock`]. `ui::TuiSession`
//! implements the first three over a ratatui terminal.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::screenflow::models::{Form, Key, TextStyle};

/// Something that can show stimuli one frame at a time.
pub trait Surface {
    /// Queue centered text for the next frame.
    fn draw_text(&mut self, text: &str, style: &TextStyle) -> Result<()>;

    /// Queue an image for the next frame, offset from the center.
    fn draw_image(&mut self, path: &Path, position: (i16, i16)) -> Result<()>;

    /// Show everything queued since the last flip.
    fn flip(&mut self) -> Result<()>;

    /// Release the surface. Drawing after close is an error.
    fn close(&mut self) -> Result<()>;
}

/// Keyboard polling.
///
/// Both checks consume the keys pressed since the previous check.
pub trait InputSource {
    fn key_pressed(&mut self, key: Key) -> Result<bool>;

    fn any_key_pressed(&mut self) -> Result<bool>;
}

/// Blocking modal dialogs.
pub trait DialogService {
    /// Returns the submitted values in field order, or `None` if dismissed.
    fn show_form(&mut self, form: &Form) -> Result<Option<Vec<String>>>;

    /// Text-only acknowledgement dialog.
    fn show_message(&mut self, lines: &[&str]) -> Result<()>;
}

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
