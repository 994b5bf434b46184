use tracing::info;

use crate::error::Result;
use crate::screenflow::models::TextStyle;
use crate::screenflow::window::{InputSource, Surface};

pub const DEFAULT_OUTRO: &str = "Thanks!";

/// Shows the closing message until any key is pressed, then releases the surface.
///
/// This is the last call of an experiment; the caller exits afterwards.
pub fn show_goodbye<W: Surface + InputSource>(
    win: &mut W,
    outro_text: &str,
    style: &TextStyle,
) -> Result<()> {
    while !win.any_key_pressed()? {
        win.draw_text(outro_text, style)?;
        win.flip()?;
    }
    win.close()?;
    info!("Session finished");
    Ok(())
}
