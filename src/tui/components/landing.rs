//! # Landing Page Component
//!
//! Welcome screen shown while the conversation is empty.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

pub const WELCOME_TITLE: &str = "Welcome to CampusGPT!";
pub const WELCOME_HINT: &str = "Ask me anything about your college - admissions, courses, \
    facilities, events, and more. I'm here to help!";

pub struct LandingPage {
    pub endpoint: String,
}

impl LandingPage {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "( ? )",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                WELCOME_TITLE,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(WELCOME_HINT, Style::default().fg(Color::Gray))),
            Line::default(),
            Line::from(Span::styled(
                format!("answers from {} · v{}", self.endpoint, env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        // Hint wraps on narrow terminals; leave room for it.
        let text_height = (lines.len() as u16 + 2).min(area.height);
        let width = area.width.min(72);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [center] = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .areas(column);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, center);
    }
}
