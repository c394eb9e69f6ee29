//! # TitleBar Component
//!
//! Single-line header: app title, status, endpoint, and a "↓ New" marker
//! when the user has scrolled away from fresh content.
//!
//! Stateless: every field is a prop filled in by the parent each frame.
//!
//! The text degrades in priority order so narrow terminals keep the useful
//! part visible:
//!
//! 1. `"CampusGPT – Ask About Your College | Asking... | ↓ New"`
//! 2. `"CampusGPT – Ask About Your College | Asking..."`
//! 3. `"CampusGPT – Ask About Your College"` (clipped if even this is too wide)
//!
//! The endpoint is right-aligned and simply clipped when space runs out.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_TITLE: &str = "CampusGPT – Ask About Your College";

pub struct TitleBar {
    pub status_message: String,
    pub endpoint: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(status_message: String, endpoint: String, has_unseen_content: bool) -> Self {
        Self {
            status_message,
            endpoint,
            has_unseen_content,
        }
    }

    /// Longest variant of the left-hand text that fits in `width` cells.
    fn left_text(&self, width: u16) -> String {
        let mut candidates = Vec::with_capacity(3);
        if !self.status_message.is_empty() {
            if self.has_unseen_content {
                candidates.push(format!("{APP_TITLE} | {} | ↓ New", self.status_message));
            }
            candidates.push(format!("{APP_TITLE} | {}", self.status_message));
        } else if self.has_unseen_content {
            candidates.push(format!("{APP_TITLE} | ↓ New"));
        }

        candidates
            .into_iter()
            .find(|text| text.chars().count() <= usize::from(width))
            .unwrap_or_else(|| APP_TITLE.to_string())
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let endpoint_width = (self.endpoint.chars().count() as u16 + 1).min(area.width / 3);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(endpoint_width)])
                .areas(area);

        let title = Line::from(vec![Span::styled(
            self.left_text(left.width),
            Style::default().add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(title, left);

        let endpoint = Line::from(Span::styled(
            self.endpoint.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
        .right_aligned();
        frame.render_widget(endpoint, right);
    }
}
