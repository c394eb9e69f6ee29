//! # InputBox Component
//!
//! Captures keystrokes for the question draft.
//!
//! ## State Management
//!
//! The draft itself belongs to the core `Session`. The box keeps a working
//! copy plus a cursor, reports every edit as `InputEvent::Edited` so the
//! loop can forward it as `Action::InputChanged`, and re-syncs from the
//! session after each update (which is how it gets cleared on submit).
//!
//! Typing stays enabled while an answer is pending; only submission is
//! gated, and that gate lives in the core.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
const MAX_VISIBLE_LINES: u16 = 5;

pub const PLACEHOLDER: &str = "Ask about courses, admissions, facilities, events...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The draft text changed; carries the full new text.
    Edited(String),
    /// User pressed Enter; carries the draft as typed (untrimmed).
    Submit(String),
}

/// Text input component.
///
/// # Props
///
/// - `waiting`: whether an answer is pending (changes the title only)
///
/// # State
///
/// - `buffer`: working copy of the draft
/// - `cursor`: byte offset into `buffer`
pub struct InputBox {
    pub buffer: String,
    pub waiting: bool,
    cursor: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrapped lines of `text`, with an explicit empty line after a trailing newline.
fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            waiting: false,
            cursor: 0,
        }
    }

    /// Adopt the session's draft if it differs from ours (e.g. cleared on submit).
    pub fn sync(&mut self, pending_input: &str) {
        if self.buffer != pending_input {
            self.buffer = pending_input.to_string();
            self.cursor = self.buffer.len();
        }
    }

    /// Required height for the current buffer, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let width = area_width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = wrapped_lines(&self.buffer, width).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Cursor position as (column, row) within the wrapped content.
    fn cursor_cell(&self, width: u16) -> (u16, u16) {
        if width == 0 {
            return (0, 0);
        }
        let before = &self.buffer[..self.cursor];
        let lines = wrapped_lines(before, width);
        let row = lines.len().saturating_sub(1) as u16;
        let last = lines.last().map(String::as_str).unwrap_or("");

        // textwrap drops the spaces a line ends on; the cursor sits after them.
        let typed_spaces = before.len() - before.trim_end_matches(' ').len();
        let kept_spaces = last.len() - last.trim_end_matches(' ').len();
        let col = (last.chars().count() + typed_spaces.saturating_sub(kept_spaces)) as u16;

        if col >= width {
            (0, row + 1)
        } else {
            (col, row)
        }
    }

    fn edited(&self) -> Option<InputEvent> {
        Some(InputEvent::Edited(self.buffer.clone()))
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = wrapped_lines(&self.buffer, width);
        let (cursor_col, cursor_row) = self.cursor_cell(width);

        // Scroll so the cursor row stays inside the visible window
        let scroll = cursor_row.saturating_sub(MAX_VISIBLE_LINES - 1) as usize;
        let visible = lines
            .iter()
            .skip(scroll)
            .take(MAX_VISIBLE_LINES as usize)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let title = if self.waiting {
            " Ask (waiting for answer...) "
        } else {
            " Ask (Enter to send, Ctrl+J newline) "
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(title);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            Paragraph::new(visible).style(Style::default().fg(Color::Cyan))
        };
        frame.render_widget(paragraph.block(block), area);

        // Border (1) + padding (1)
        let x = area.x + 2 + cursor_col;
        let y = area.y + 1 + (cursor_row as usize - scroll) as u16;
        frame.set_cursor_position((x, y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.edited()
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                self.edited()
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.edited()
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.edited()
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            // The core decides whether the draft is worth sending.
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    #[test]
    fn test_handle_input_reports_full_text() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::Edited("a".to_string())));

        let res = input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(res, Some(InputEvent::Edited("ab".to_string())));

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::Edited("a".to_string())));
    }

    #[test]
    fn test_backspace_at_start_is_ignored() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_insert_mid_buffer() {
        let mut input = typed("hllo");
        for _ in 0..3 {
            input.handle_event(&TuiEvent::CursorLeft);
        }
        input.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = typed("café");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "caf");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "ca");
    }

    #[test]
    fn test_home_and_end_stay_on_line() {
        let mut input = typed("first\nsecond");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(input.buffer, "first\n>second");
        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, "first\n>second!");
    }

    #[test]
    fn test_submit_does_not_clear_buffer() {
        let mut input = typed("library hours");
        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("library hours".to_string())));
        assert_eq!(input.buffer, "library hours");
    }

    #[test]
    fn test_sync_adopts_session_draft() {
        let mut input = typed("library hours");
        input.sync("");
        assert!(input.buffer.is_empty());
        // Cursor was reset along with the buffer
        input.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_height_is_clamped() {
        let input = InputBox::new();
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);

        let input = typed(&"a\n".repeat(20));
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_cursor_cell_tracks_wrapping() {
        let input = typed("hello ");
        assert_eq!(input.cursor_cell(20), (6, 0));

        let input = typed("line\n");
        assert_eq!(input.cursor_cell(20), (0, 1));

        let input = typed("abcdefghij");
        // Width 5 breaks into "abcde" | "fghij"; the cursor wraps past the end
        assert_eq!(input.cursor_cell(5), (0, 2));
    }

    fn rendered_text(input: &mut InputBox) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let text = rendered_text(&mut InputBox::new());
        assert!(text.contains("Ask about courses"));
    }

    #[test]
    fn test_render_title_reflects_waiting() {
        let mut input = typed("next question");
        input.waiting = true;
        let text = rendered_text(&mut input);
        assert!(text.contains("waiting for answer"));
        assert!(text.contains("next question"));
    }
}
