//! # ErrorBanner Component
//!
//! Red box above the conversation showing why the last turn failed.
//! Purely presentational; dismissing it is a core action (Ctrl+X).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::Component;

const VERTICAL_OVERHEAD: u16 = 2;
const HORIZONTAL_OVERHEAD: u16 = 2;
/// The banner never grows past this many text lines.
const MAX_LINES: u16 = 3;

pub struct ErrorBanner<'a> {
    pub message: &'a str,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    fn text(&self) -> String {
        format!("⚠ {}", self.message)
    }

    pub fn calculate_height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD).max(1) as usize;
        let lines = textwrap::wrap(&self.text(), inner).len() as u16;
        lines.clamp(1, MAX_LINES) + VERTICAL_OVERHEAD
    }
}

impl<'a> Component for ErrorBanner<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::Red);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(Line::from(" Connection Error ").style(style.add_modifier(Modifier::BOLD)))
            .title_bottom(Line::from(" Ctrl+X to dismiss ").right_aligned().style(style.add_modifier(Modifier::DIM)));

        let paragraph = Paragraph::new(self.text())
            .block(block)
            .style(style)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
