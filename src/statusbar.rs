use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::client::ConnectionStatus;

pub struct StatusBarRenderer {
    pub status_message: String,
    pub connection_status: ConnectionStatus,
}

impl StatusBarRenderer {
    pub fn new() -> Self {
        Self {
            status_message: "Ready".to_string(),
            connection_status: ConnectionStatus::Disconnected,
        }
    }

    pub fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let background = match self.connection_status {
            ConnectionStatus::Connected(_) => Color::Green,
            ConnectionStatus::Error(_) => Color::Red,
            _ => Color::Blue,
        };
        let status_text = format!(" {} | Status: {}", self.status_message, self.connection_status);

        let status = Paragraph::new(status_text).style(Style::default().bg(background).fg(Color::White));
        f.render_widget(status, area);
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.connection_status = status;
    }
}
