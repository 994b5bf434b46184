use crate::screenflow::models::TextStyle;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

// Placeholder frame for images; a terminal cannot show the bitmap itself
const IMAGE_WIDTH: u16 = 40;
const IMAGE_HEIGHT: u16 = 12;

/// A stimulus queued for the next flip.
#[derive(Debug, Clone)]
pub enum Stim {
    Text { text: String, style: TextStyle },
    Image { path: PathBuf, position: (i16, i16) },
}

/// Parses a style color, falling back to the terminal default.
pub fn style_color(style: &TextStyle) -> Color {
    Color::from_str(&style.color).unwrap_or(Color::Reset)
}

/// Number of rows `text` needs when wrapped at `width` columns.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    rows.max(1).min(usize::from(u16::MAX)) as u16
}

/// A `width` x `height` rect centered in `area`, moved by `offset` cells and
/// clipped to `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16, offset: (i16, i16)) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = i32::from(area.x) + i32::from((area.width - width) / 2) + i32::from(offset.0);
    let y = i32::from(area.y) + i32::from((area.height - height) / 2) + i32::from(offset.1);
    let max_x = i32::from(area.x + area.width - width);
    let max_y = i32::from(area.y + area.height - height);
    Rect::new(
        x.clamp(i32::from(area.x), max_x) as u16,
        y.clamp(i32::from(area.y), max_y) as u16,
        width,
        height,
    )
}

fn draw_text(f: &mut Frame, text: &str, style: &TextStyle) {
    let size = f.area();
    let width = style.wrap_width.min(size.width);
    let area = centered_rect(size, width, wrapped_height(text, width), (0, 0));

    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(style_color(style)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_image(f: &mut Frame, path: &Path, position: (i16, i16)) {
    let area = centered_rect(f.area(), IMAGE_WIDTH, IMAGE_HEIGHT, position);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let block = Block::default()
        .title(name)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let label = Paragraph::new(path.display().to_string())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(label, centered_rect(inner, inner.width, 1, (0, 0)));
}

/// Draws one frame: a cleared screen with every queued stimulus in order.
pub fn draw_stims(f: &mut Frame, stims: &[Stim]) {
    let size = f.area();
    f.render_widget(Clear, size);
    for stim in stims {
        match stim {
            Stim::Text { text, style } => draw_text(f, text, style),
            Stim::Image { path, position } => draw_image(f, path, *position),
        }
    }
}
