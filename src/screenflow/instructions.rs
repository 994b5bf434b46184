use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{FlowError, Result};
use crate::screenflow::models::{Key, TextStyle};
use crate::screenflow::window::{InputSource, Surface};

/// What the instruction screen shows and which key leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstructionOptions {
    pub use_image: bool,
    pub img_file: PathBuf,
    /// Takes precedence over the image when set
    pub intro_text: Option<String>,
    pub continue_key: Key,
}

impl Default for InstructionOptions {
    fn default() -> Self {
        InstructionOptions {
            use_image: true,
            img_file: PathBuf::from("img/instructions.bmp"),
            intro_text: None,
            continue_key: Key::Space,
        }
    }
}

impl InstructionOptions {
    pub fn text(text: &str) -> InstructionOptions {
        InstructionOptions {
            intro_text: Some(text.to_string()),
            ..InstructionOptions::default()
        }
    }

    pub fn image(path: impl Into<PathBuf>) -> InstructionOptions {
        InstructionOptions {
            img_file: path.into(),
            ..InstructionOptions::default()
        }
    }
}

enum Stimulus<'a> {
    Image(&'a PathBuf),
    Text(&'a str),
}

fn resolve(options: &InstructionOptions) -> Result<Stimulus<'_>> {
    let use_image = options.use_image && options.intro_text.is_none();

    if use_image {
        if !options.img_file.exists() {
            error!(path = %options.img_file.display(), "Image file not found");
            return Err(FlowError::MissingImage(options.img_file.clone()));
        }
        return Ok(Stimulus::Image(&options.img_file));
    }

    match options.intro_text.as_deref() {
        Some(text) if !text.trim().is_empty() => Ok(Stimulus::Text(text)),
        _ => {
            error!("Invalid or missing instruction text");
            Err(FlowError::InvalidInstructionText)
        }
    }
}

/// Shows instructions centered on screen until the continue key is pressed.
///
/// A missing image or blank text is reported before any frame is drawn.
pub fn show_instructions<W: Surface + InputSource>(
    win: &mut W,
    options: &InstructionOptions,
    style: &TextStyle,
) -> Result<()> {
    let stimulus = resolve(options)?;
    debug!(key = %options.continue_key, "Showing instructions");

    while !win.key_pressed(options.continue_key)? {
        match stimulus {
            Stimulus::Image(path) => win.draw_image(path, (0, 0))?,
            Stimulus::Text(text) => win.draw_text(text, style)?,
        }
        win.flip()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenflow::testing::{FakeWindow, Stim};

    #[test]
    fn test_text_shown_until_continue_key() {
        let mut win = FakeWindow::pressing(Key::Space, 4);
        let options = InstructionOptions::text("Press space to begin");

        show_instructions(&mut win, &options, &TextStyle::default()).unwrap();

        assert_eq!(win.frames.len(), 3);
        assert!(win.texts().iter().all(|t| t == "Press space to begin"));
    }

    #[test]
    fn test_other_keys_do_not_continue() {
        let mut win = FakeWindow::with_presses(&[(2, Key::Char('x')), (4, Key::Space)]);
        let options = InstructionOptions::text("go");

        show_instructions(&mut win, &options, &TextStyle::default()).unwrap();

        assert_eq!(win.polls, 4);
        assert_eq!(win.frames.len(), 3);
    }

    #[test]
    fn test_text_takes_precedence_over_image() {
        let mut win = FakeWindow::pressing(Key::Space, 2);
        let options = InstructionOptions {
            use_image: true,
            img_file: PathBuf::from("does/not/exist.bmp"),
            intro_text: Some("Read me".to_string()),
            continue_key: Key::Space,
        };

        show_instructions(&mut win, &options, &TextStyle::default()).unwrap();

        assert_eq!(win.frames, vec![vec![Stim::Text("Read me".to_string())]]);
    }

    #[test]
    fn test_image_drawn_at_center() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instructions.bmp");
        std::fs::write(&path, b"BM").unwrap();

        let mut win = FakeWindow::pressing(Key::Space, 2);
        show_instructions(
            &mut win,
            &InstructionOptions::image(&path),
            &TextStyle::default(),
        )
        .unwrap();

        assert_eq!(win.frames, vec![vec![Stim::Image(path, (0, 0))]]);
    }

    #[test]
    fn test_missing_image_fails_before_waiting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bmp");
        let mut win = FakeWindow::pressing(Key::Space, 1);

        let result = show_instructions(
            &mut win,
            &InstructionOptions::image(&path),
            &TextStyle::default(),
        );

        assert!(matches!(result, Err(FlowError::MissingImage(p)) if p == path));
        assert_eq!(win.polls, 0);
        assert!(win.frames.is_empty());
    }

    #[test]
    fn test_blank_text_fails_before_waiting() {
        for options in [
            InstructionOptions::text("   \n\t"),
            InstructionOptions {
                use_image: false,
                ..InstructionOptions::default()
            },
        ] {
            let mut win = FakeWindow::pressing(Key::Space, 1);
            let result = show_instructions(&mut win, &options, &TextStyle::default());
            assert!(matches!(result, Err(FlowError::InvalidInstructionText)));
            assert_eq!(win.polls, 0);
        }
    }
}
