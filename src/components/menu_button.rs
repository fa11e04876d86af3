use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::ListItem,
};

/// Extra styling applied on top of the default entry look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonClass {
    Primary,
    Danger,
    Muted,
}

impl ButtonClass {
    fn style(self) -> Style {
        match self {
            ButtonClass::Primary => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ButtonClass::Danger => Style::default().fg(Color::Red),
            ButtonClass::Muted => Style::default().fg(Color::DarkGray),
        }
    }
}

/// Stateless clickable list entry with an icon and a label.
pub struct MenuButton<A> {
    pub id: &'static str,
    pub label: String,
    pub icon: &'static str,
    pub class: Option<ButtonClass>,
    on_click: Box<dyn Fn() -> A + Send>,
}

impl<A> MenuButton<A> {
    pub fn new(
        id: &'static str,
        label: impl Into<String>,
        icon: &'static str,
        on_click: impl Fn() -> A + Send + 'static,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            icon,
            class: None,
            on_click: Box::new(on_click),
        }
    }

    pub fn with_class(mut self, class: ButtonClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn click(&self) -> A {
        (self.on_click)()
    }

    pub fn render(&self) -> ListItem<'static> {
        let style = self
            .class
            .map(ButtonClass::style)
            .unwrap_or_else(|| Style::default().fg(Color::White));
        ListItem::new(Line::from(vec![
            Span::styled(format!("{} ", self.icon), Style::default().fg(Color::Yellow)),
            Span::styled(self.label.clone(), style),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_forwards_to_handler() {
        let button = MenuButton::new("quit", "Quit", "x", || 7).with_class(ButtonClass::Danger);
        assert_eq!(button.click(), 7);
        assert_eq!(button.click(), 7);
        assert_eq!(button.class, Some(ButtonClass::Danger));
    }

    #[test]
    fn render_produces_single_line_entry() {
        let button = MenuButton::new("login", "Log in", ">", || ());
        assert_eq!(button.render().height(), 1);
    }
}
