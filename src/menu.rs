use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListState},
    Frame,
};

use crate::components::{ButtonClass, MenuButton};
use crate::i18n::Translator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Login,
    ExternalLogin,
    WaitForHost,
    Quit,
}

/// Side panel listing the application's menu buttons.
pub struct MenuRenderer {
    buttons: Vec<MenuButton<MenuAction>>,
    state: ListState,
    area: Option<Rect>,
}

impl MenuRenderer {
    pub fn new(translator: &dyn Translator, external_login: bool) -> Self {
        let mut buttons = vec![
            MenuButton::new("login", translator.text("toolbar.login"), "🔑", || MenuAction::Login)
                .with_class(ButtonClass::Primary),
        ];
        if external_login {
            buttons.push(MenuButton::new(
                "external-login",
                translator.text("toolbar.externalLogin"),
                "🌐",
                || MenuAction::ExternalLogin,
            ));
        }
        buttons.push(
            MenuButton::new(
                "wait-for-host",
                translator.text("toolbar.waitForHost"),
                "⏳",
                || MenuAction::WaitForHost,
            )
            .with_class(ButtonClass::Muted),
        );
        buttons.push(
            MenuButton::new("quit", translator.text("toolbar.quit"), "✖", || MenuAction::Quit)
                .with_class(ButtonClass::Danger),
        );

        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            buttons,
            state,
            area: None,
        }
    }

    pub fn select_next(&mut self) {
        let next = self.state.selected().map_or(0, |i| (i + 1) % self.buttons.len());
        self.state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let len = self.buttons.len();
        let prev = self.state.selected().map_or(0, |i| (i + len - 1) % len);
        self.state.select(Some(prev));
    }

    pub fn activate_selected(&self) -> Option<MenuAction> {
        self.state
            .selected()
            .and_then(|i| self.buttons.get(i))
            .map(MenuButton::click)
    }

    pub fn button_id(&self, action: MenuAction) -> Option<&'static str> {
        self.buttons.iter().find(|b| b.click() == action).map(|b| b.id)
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> Option<MenuAction> {
        let area = self.area?;
        let inside = column > area.x
            && column < area.x + area.width.saturating_sub(1)
            && row > area.y
            && row < area.y + area.height.saturating_sub(1);
        if !inside {
            return None;
        }
        let idx = (row - area.y - 1) as usize + self.state.offset();
        let button = self.buttons.get(idx)?;
        self.state.select(Some(idx));
        Some(button.click())
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        self.area = Some(area);
        let items: Vec<_> = self.buttons.iter().map(MenuButton::render).collect();
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let list = List::new(items)
            .block(Block::default().title(" Menu ").borders(Borders::ALL).border_style(border))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(list, area, &mut self.state);
    }
}
