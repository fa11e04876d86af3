use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_input::Input;

use super::view::{Focus, ModalView, ViewKind};
use crate::dialog::constants::keys;
use crate::dialog::types::*;
use crate::ui_utils::LayoutUtils;

const BUTTON_WIDTH: u16 = 16;

impl ModalView {
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let dialog_area = LayoutUtils::centered_rect(60, 50, 56, 14, area);
        f.render_widget(Clear, dialog_area);

        let title = match &self.kind {
            ViewKind::States { .. } => self.current_state().map(|s| s.title_key).unwrap_or_default(),
            ViewKind::Notice(notice) => notice.title_key,
        };
        let block = Block::default()
            .title(format!(" {} ", self.translator.text(title)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(dialog_area);
        f.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Buttons
            ])
            .split(inner);

        match &self.kind {
            ViewKind::Notice(notice) => {
                let text = self.translator.message(&notice.message);
                render_text(f, chunks[0], text, Style::default().fg(Color::White));
            }
            ViewKind::States { .. } => match self.current_state().map(|s| (s.id, s.body)) {
                Some((_, StateBody::CredentialForm)) => self.render_form(f, chunks[0]),
                Some((id, StateBody::StatusRegion)) => {
                    let text = match self.message(id) {
                        Some(message) => self.translator.message(message),
                        None => self.translator.text(keys::CONNECTING_STATUS),
                    };
                    render_text(f, chunks[0], text, Style::default().fg(Color::Cyan));
                }
                Some((id, StateBody::ErrorRegion)) => {
                    let text = self
                        .message(id)
                        .map(|m| self.translator.message(m))
                        .unwrap_or_default();
                    render_text(f, chunks[0], text, Style::default().fg(Color::Red));
                }
                None => {}
            },
        }

        let areas = LayoutUtils::create_button_layout(chunks[1], self.buttons.len(), BUTTON_WIDTH);
        self.buttons.render_buttons(f, &areas);
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let rows = LayoutUtils::create_form_layout(area, 2);
        let identity_label = self.translator.text(keys::IDENTITY_LABEL);
        let secret_label = self.translator.text(keys::SECRET_LABEL);
        let placeholder = self.translator.text(keys::IDENTITY_PLACEHOLDER);

        let identity_focused = self.focus == Some(Focus::Field(FormField::Identity));
        let secret_focused = self.focus == Some(Focus::Field(FormField::Secret));

        render_field(f, rows[0], &self.identity, &identity_label, identity_focused, FieldDisplay::Plain(&placeholder));
        render_field(f, rows[1], &self.secret, &secret_label, secret_focused, FieldDisplay::Masked);
    }
}

enum FieldDisplay<'a> {
    Plain(&'a str), // placeholder shown while empty
    Masked,
}

fn render_field(f: &mut Frame, area: Rect, input: &Input, label: &str, focused: bool, display: FieldDisplay<'_>) {
    let width = area.width.max(3) - 3;
    let (scroll, cursor_x) = field_cursor(input, matches!(display, FieldDisplay::Masked), width as usize);

    let (text, style) = match display {
        FieldDisplay::Plain(placeholder) if input.value().is_empty() && !focused => {
            (placeholder.to_string(), Style::default().fg(Color::DarkGray))
        }
        FieldDisplay::Plain(_) => (input.value().to_string(), Style::default().fg(Color::White)),
        FieldDisplay::Masked => ("*".repeat(input.value().chars().count()), Style::default().fg(Color::White)),
    };
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().title(label.to_string()).borders(Borders::ALL).border_style(border_style));
    f.render_widget(paragraph, area);

    if focused {
        f.set_cursor_position(Position::new(area.x + 1 + cursor_x as u16, area.y + 1));
    }
}

/// Horizontal scroll and cursor column inside a field `width` cells wide.
/// A masked field draws one `*` per char, whatever the char's display width.
fn field_cursor(input: &Input, masked: bool, width: usize) -> (usize, usize) {
    if !masked {
        let scroll = input.visual_scroll(width);
        return (scroll, input.visual_cursor().saturating_sub(scroll));
    }
    let cursor = input.cursor();
    let scroll = (cursor + 1).saturating_sub(width);
    (scroll, cursor.saturating_sub(scroll))
}

fn render_text(f: &mut Frame, area: Rect, text: String, style: Style) {
    let paragraph = Paragraph::new(text).style(style).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area.inner(ratatui::layout::Margin::new(1, 1)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_cursor_counts_chars_not_cells() {
        let input = Input::from("日本語");
        assert_eq!(field_cursor(&input, true, 20), (0, 3));
        assert_eq!(field_cursor(&input, false, 20), (0, 6));
    }

    #[test]
    fn masked_cursor_scrolls_past_field_width() {
        let input = Input::from("abcdef");
        assert_eq!(field_cursor(&input, true, 4), (3, 3));
    }
}
