use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::{Message, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Bubbles take at most this share of the row, leaving a gutter on the far side.
const BUBBLE_WIDTH_PERCENT: u16 = 85;
/// Below this width bubbles stop shrinking and fill the row.
const MIN_BUBBLE_WIDTH: u16 = 24;

/// A single chat bubble. User messages hug the right edge, assistant
/// messages the left, like a phone messenger.
///
/// Created fresh each frame. Height is predicted with `textwrap` and the
/// same wrapped lines are what gets rendered, so layout and paint agree.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Width of a bubble drawn in a row `row_width` cells wide.
    pub fn bubble_width(row_width: u16) -> u16 {
        let preferred = row_width * BUBBLE_WIDTH_PERCENT / 100;
        preferred.max(MIN_BUBBLE_WIDTH.min(row_width))
    }

    /// Height of the bubble for `message` in a row `row_width` cells wide.
    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still take a row.
            return 1;
        }
        let lines = wrap_content(message.content(), content_width).len();
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn bubble_rect(&self, area: Rect) -> Rect {
        let width = Self::bubble_width(area.width);
        let x = match self.message.role() {
            Role::User => area.x + area.width - width,
            Role::Assistant => area.x,
        };
        Rect::new(x, area.y, width, area.height)
    }
}

fn wrap_content(content: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(content.trim(), options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

pub(crate) fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::Green),
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let role = self.message.role();
        let style = role_style(role);
        let border_style = style.add_modifier(Modifier::DIM);

        let title = format!(" {} · {} ", role.label(), self.message.time_label());
        let title = match role {
            Role::User => Line::from(title).right_aligned(),
            Role::Assistant => Line::from(title).left_aligned(),
        };

        let rect = self.bubble_rect(area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .title_style(style.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines: Vec<Line> = wrap_content(self.message.content(), inner.width)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(Text::from(lines)).style(style).render(inner, buf);
    }
}

impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
