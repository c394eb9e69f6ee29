//! # Thinking Indicator
//!
//! Placeholder bubble shown under the last question while a request is
//! outstanding. Three dots light up in turn, one step per spinner frame.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

pub const THINKING_TEXT: &str = "CampusGPT is thinking...";

/// Rows taken by the indicator (border + one line + border).
pub const THINKING_HEIGHT: u16 = 3;

const DOT_COUNT: usize = 3;
/// Spinner frames per lit dot.
const FRAMES_PER_DOT: usize = 3;

pub struct ThinkingIndicator {
    pub spinner_frame: usize,
}

impl ThinkingIndicator {
    pub fn new(spinner_frame: usize) -> Self {
        Self { spinner_frame }
    }

    /// Index of the dot currently lit.
    pub fn lit_dot(&self) -> usize {
        (self.spinner_frame / FRAMES_PER_DOT) % DOT_COUNT
    }

    fn width() -> u16 {
        // dots + gap + label + borders + padding
        (DOT_COUNT * 2 + 1 + THINKING_TEXT.len() + 4) as u16
    }
}

impl Widget for ThinkingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let lit = self.lit_dot();
        let mut spans: Vec<Span> = (0..DOT_COUNT)
            .map(|i| {
                let style = if i == lit {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
                };
                Span::styled("● ", style)
            })
            .collect();
        spans.push(Span::styled(
            format!(" {THINKING_TEXT}"),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ));

        let rect = Rect::new(area.x, area.y, Self::width().min(area.width), area.height);
        Paragraph::new(Line::from(spans))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Green).add_modifier(Modifier::DIM))
                    .padding(Padding::horizontal(1)),
            )
            .render(rect, buf);
    }
}
