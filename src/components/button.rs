use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dialog::types::ButtonValue;

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonState {
    Normal,
    Hovered,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonColor {
    Default,
    Green,
    Red,
    Blue,
}

impl ButtonColor {
    fn base(self) -> Color {
        match self {
            ButtonColor::Default => Color::White,
            ButtonColor::Green => Color::Green,
            ButtonColor::Red => Color::Red,
            ButtonColor::Blue => Color::Cyan,
        }
    }

    pub fn for_value(value: ButtonValue) -> Self {
        match value {
            ButtonValue::Confirm | ButtonValue::AuthenticateNow => ButtonColor::Green,
            ButtonValue::Cancel => ButtonColor::Red,
            ButtonValue::Retry => ButtonColor::Blue,
            ButtonValue::Dismiss => ButtonColor::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonAction {
    Clicked,
    None,
}

#[derive(Debug, Clone)]
pub struct Button {
    pub value: ButtonValue,
    pub label: String,
    pub hotkey: Option<char>, // For Alt+key shortcuts
    pub color: ButtonColor,
    pub state: ButtonState,
    pub enabled: bool,
    pub area: Option<Rect>, // Set during rendering for click detection
}

impl Button {
    pub fn new(value: ButtonValue, label: &str) -> Self {
        Self {
            value,
            label: label.to_string(),
            hotkey: None,
            color: ButtonColor::for_value(value),
            state: ButtonState::Normal,
            enabled: true,
            area: None,
        }
    }

    pub fn with_hotkey(mut self, key: char) -> Self {
        self.hotkey = Some(key);
        self
    }

    pub fn set_state(&mut self, state: ButtonState) {
        if self.enabled {
            self.state = state;
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.state = if enabled { ButtonState::Normal } else { ButtonState::Disabled };
    }

    pub fn handle_key_input(&self, key: KeyCode, modifiers: KeyModifiers) -> ButtonAction {
        if !self.enabled {
            return ButtonAction::None;
        }

        if let (KeyCode::Char(c), Some(hotkey)) = (key, self.hotkey) {
            if modifiers.contains(KeyModifiers::ALT) && c.eq_ignore_ascii_case(&hotkey) {
                return ButtonAction::Clicked;
            }
        }

        ButtonAction::None
    }

    pub fn handle_mouse_click(&self, column: u16, row: u16) -> ButtonAction {
        if !self.enabled {
            return ButtonAction::None;
        }

        if let Some(area) = self.area {
            if column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height
            {
                return ButtonAction::Clicked;
            }
        }

        ButtonAction::None
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        // Store area for click detection
        self.area = Some(area);

        let base = self.color.base();
        let style = match self.state {
            ButtonState::Normal => Style::default().fg(base),
            ButtonState::Hovered => Style::default().fg(Color::Black).bg(base),
            ButtonState::Disabled => Style::default().fg(Color::DarkGray),
        };

        let block = Block::default().borders(Borders::ALL).border_style(style);
        let paragraph = Paragraph::new(self.create_button_text(style))
            .block(block)
            .style(style);

        f.render_widget(paragraph, area);
    }

    fn create_button_text(&self, base_style: Style) -> Line<'static> {
        let mut spans = Vec::new();

        if let Some(hotkey) = self.hotkey {
            // Underline the first occurrence of the hotkey in the label
            let mut found_hotkey = false;
            for ch in self.label.chars() {
                if !found_hotkey && ch.eq_ignore_ascii_case(&hotkey) {
                    spans.push(Span::styled(ch.to_string(), base_style.fg(Color::Red)));
                    found_hotkey = true;
                } else {
                    spans.push(Span::styled(ch.to_string(), base_style));
                }
            }

            if !found_hotkey {
                spans.push(Span::styled(
                    format!(" (Alt+{})", hotkey.to_ascii_uppercase()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        } else {
            spans.push(Span::styled(self.label.clone(), base_style));
        }

        Line::from(spans)
    }
}

// Button manager for handling multiple buttons
#[derive(Debug, Default)]
pub struct ButtonManager {
    buttons: Vec<Button>,
    focused_button: Option<usize>,
}

impl ButtonManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_button(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
        self.focused_button = None;
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused_button
    }

    pub fn focused_value(&self) -> Option<ButtonValue> {
        self.focused_button
            .and_then(|idx| self.buttons.get(idx))
            .filter(|b| b.enabled)
            .map(|b| b.value)
    }

    pub fn focus(&mut self, idx: Option<usize>) {
        self.focused_button = idx.filter(|i| *i < self.buttons.len());
    }

    /// Hotkeys only; Tab and Enter are routed by the owning view.
    pub fn handle_key_input(&self, key: KeyCode, modifiers: KeyModifiers) -> Option<ButtonValue> {
        self.buttons
            .iter()
            .find(|b| b.handle_key_input(key, modifiers) == ButtonAction::Clicked)
            .map(|b| b.value)
    }

    pub fn handle_mouse_click(&mut self, column: u16, row: u16) -> Option<ButtonValue> {
        for (idx, button) in self.buttons.iter().enumerate() {
            if button.handle_mouse_click(column, row) == ButtonAction::Clicked {
                self.focused_button = Some(idx);
                return Some(button.value);
            }
        }
        None
    }

    pub fn render_buttons(&mut self, f: &mut Frame, areas: &[Rect]) {
        // Update button states based on focus
        for (idx, button) in self.buttons.iter_mut().enumerate() {
            if Some(idx) == self.focused_button && button.enabled {
                button.set_state(ButtonState::Hovered);
            } else if button.enabled {
                button.set_state(ButtonState::Normal);
            }
        }

        for (button, area) in self.buttons.iter_mut().zip(areas) {
            button.render(f, *area);
        }
    }

    pub fn get_button_mut(&mut self, value: ButtonValue) -> Option<&mut Button> {
        self.buttons.iter_mut().find(|b| b.value == value)
    }

    pub fn set_button_enabled(&mut self, value: ButtonValue, enabled: bool) {
        if let Some(button) = self.get_button_mut(value) {
            button.set_enabled(enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ButtonManager {
        let mut manager = ButtonManager::new();
        manager.add_button(Button::new(ButtonValue::Retry, "Retry").with_hotkey('r'));
        manager.add_button(Button::new(ButtonValue::Cancel, "Cancel").with_hotkey('c'));
        manager
    }

    #[test]
    fn alt_hotkey_clicks_button() {
        let manager = manager();
        assert_eq!(
            manager.handle_key_input(KeyCode::Char('C'), KeyModifiers::ALT),
            Some(ButtonValue::Cancel)
        );
        assert_eq!(manager.handle_key_input(KeyCode::Char('c'), KeyModifiers::NONE), None);
    }

    #[test]
    fn disabled_button_ignores_hotkey_and_focus() {
        let mut manager = manager();
        manager.set_button_enabled(ButtonValue::Retry, false);
        manager.focus(Some(0));
        assert_eq!(manager.handle_key_input(KeyCode::Char('r'), KeyModifiers::ALT), None);
        assert_eq!(manager.focused_value(), None);
    }

    #[test]
    fn click_inside_rendered_area() {
        let mut manager = manager();
        if let Some(button) = manager.get_button_mut(ButtonValue::Cancel) {
            button.area = Some(Rect::new(10, 5, 12, 3));
        }
        assert_eq!(manager.handle_mouse_click(11, 6), Some(ButtonValue::Cancel));
        assert_eq!(manager.focused(), Some(1));
        assert_eq!(manager.handle_mouse_click(30, 6), None);
    }
}
