use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Utility functions for common UI layouts and components
pub struct LayoutUtils;

impl LayoutUtils {
    /// Rectangle of `percent_x`×`percent_y` centered in `r`, never smaller
    /// than `min_width`×`min_height` while `r` allows it.
    pub fn centered_rect(percent_x: u16, percent_y: u16, min_width: u16, min_height: u16, r: Rect) -> Rect {
        let width = Self::percent_of(r.width, percent_x).max(min_width).min(r.width);
        let height = Self::percent_of(r.height, percent_y).max(min_height).min(r.height);
        Rect {
            x: r.x + (r.width - width) / 2,
            y: r.y + (r.height - height) / 2,
            width,
            height,
        }
    }

    fn percent_of(length: u16, percent: u16) -> u16 {
        let scaled = u32::from(length) * u32::from(percent) / 100;
        u16::try_from(scaled).unwrap_or(u16::MAX)
    }

    /// Create a standard paragraph with title styling
    pub fn create_title_paragraph(title_text: &str) -> Paragraph<'_> {
        Paragraph::new(title_text)
            .style(Style::default().fg(Color::White).bg(Color::Blue))
            .block(Block::default().borders(Borders::ALL))
    }

    /// Create a vertical form layout with multiple rows
    pub fn create_form_layout(area: Rect, num_rows: usize) -> Vec<Rect> {
        let constraints: Vec<Constraint> = (0..num_rows).map(|_| Constraint::Length(3)).collect();

        Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area)
            .to_vec()
    }

    /// Right-aligned row of `count` equally sized buttons
    pub fn create_button_layout(area: Rect, count: usize, button_width: u16) -> Vec<Rect> {
        let mut constraints = vec![Constraint::Min(0)];
        constraints.extend((0..count).map(|_| Constraint::Length(button_width)));
        constraints.push(Constraint::Length(1)); // Right margin

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);
        chunks[1..=count].to_vec()
    }
}
