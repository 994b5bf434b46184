use crate::screenflow::models::{FieldKind, Form};
use crate::screenflow::ui::input_handler::FormState;
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const POPUP_BG: Color = Color::Rgb(38, 38, 38); // #262626
const POPUP_WIDTH: u16 = 64;
const FORM_HELP: &str = "Tab: next field | ←/→: change choice | Enter: OK | Esc: cancel";
const MESSAGE_HELP: &str = "Enter: OK";

/// Centers a popup of the given size, shrunk to fit the screen.
fn popup_area(size: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        (size.width.saturating_sub(width)) / 2,
        (size.height.saturating_sub(height)) / 2,
        width.min(size.width),
        height.min(size.height),
    )
}

/// Width of the label column so values line up.
fn label_width(form: &Form) -> usize {
    form.fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0)
}

/// One line per field; the focused field is highlighted, choices get arrows.
fn field_lines(form: &Form, state: &FormState) -> Vec<Line<'static>> {
    let width = label_width(form);
    form.fields
        .iter()
        .zip(&state.values)
        .enumerate()
        .map(|(i, (field, value))| {
            let focused = i == state.focus;
            let value_text = match field.kind {
                FieldKind::Entry => value.clone(),
                FieldKind::Choice(_) => format!("< {} >", value),
            };
            let value_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!("{:<width$} ", field.label, width = width)),
                Span::styled(value_text, value_style),
            ])
        })
        .collect()
}

/// Draw a modal form with notes, one row per field and a help line.
pub fn draw_form_popup(f: &mut Frame, form: &Form, state: &FormState) {
    let size = f.area();
    // notes, blank, fields, blank, help, plus two border rows
    let height = form.notes.len() as u16 + form.fields.len() as u16 + 5;
    let area = popup_area(size, POPUP_WIDTH, height);

    f.render_widget(Clear, area);

    let popup_block = Block::default()
        .title(form.title.clone())
        .borders(Borders::ALL)
        .style(Style::default().bg(POPUP_BG));
    let inner = popup_block.inner(area);
    f.render_widget(popup_block, area);

    let mut lines: Vec<Line> = form
        .notes
        .iter()
        .map(|note| Line::styled(note.clone(), Style::default().fg(Color::Gray)))
        .collect();
    lines.push(Line::raw(""));
    let first_field_row = lines.len() as u16;
    lines.extend(field_lines(form, state));
    lines.push(Line::raw(""));
    lines.push(Line::styled(FORM_HELP, Style::default().fg(Color::DarkGray)));

    let body = Paragraph::new(lines).style(Style::default().bg(POPUP_BG));
    f.render_widget(body, inner);

    // Cursor sits at the end of the focused entry field
    if let Some(field) = form.fields.get(state.focus) {
        if field.kind == FieldKind::Entry {
            let x = label_width(form) + 1 + state.values[state.focus].chars().count();
            let y = first_field_row + state.focus as u16;
            if (x as u16) < inner.width && y < inner.height {
                f.set_cursor_position(Position {
                    x: inner.x + x as u16,
                    y: inner.y + y,
                });
            }
        }
    }
}

/// Draw a text-only acknowledgement popup.
pub fn draw_message_popup(f: &mut Frame, lines: &[&str]) {
    let size = f.area();
    let height = lines.len() as u16 + 4;
    let area = popup_area(size, POPUP_WIDTH, height);

    f.render_widget(Clear, area);

    let popup_block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(POPUP_BG));
    let inner = popup_block.inner(area);
    f.render_widget(popup_block, area);

    let mut text: Vec<Line> = lines.iter().map(|line| Line::raw(line.to_string())).collect();
    text.push(Line::raw(""));
    text.push(Line::styled(MESSAGE_HELP, Style::default().fg(Color::DarkGray)));

    let body = Paragraph::new(text)
        .style(Style::default().bg(POPUP_BG))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(body, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screenflow::intake::subject_form;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_form_popup_shows_fields_and_values() {
        let form = subject_form();
        let mut state = FormState::new(&form);
        state.focus = 2;
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();

        terminal.draw(|f| draw_form_popup(f, &form, &state)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Subject data"));
        assert!(screen.contains("For subject ID, change the last two digits only!"));
        assert!(screen.contains("Subject ID (three digit): 100"));
        assert!(screen.contains("< Male >"));
        assert!(screen.contains("< Caucasian >"));
    }

    #[test]
    fn test_message_popup_shows_lines() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();

        terminal
            .draw(|f| draw_message_popup(f, &["Age must be a 2-digit integer (≥ 18)."]))
            .unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Age must be a 2-digit integer"));
        assert!(screen.contains(MESSAGE_HELP));
    }

    #[test]
    fn test_popup_area_fits_small_screens() {
        let area = popup_area(Rect::new(0, 0, 30, 5), POPUP_WIDTH, 9);
        assert_eq!(area, Rect::new(0, 0, 30, 5));
    }
}
