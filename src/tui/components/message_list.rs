//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display the history as chat bubbles
//! - Show the thinking indicator under the last question while waiting
//! - Stick to the bottom as new turns arrive, unless the user scrolled up
//! - Cache bubble heights
//!
//! ## Layout cache
//!
//! History is append-only and messages never change, so a cached height
//! stays valid for as long as the width does. Each frame only measures
//! messages appended since the last one, and only bubbles near the viewport
//! are drawn.
//!
//! The scroll canvas is capped at `MAX_CANVAS_ROWS`. Once the history
//! outgrows that, the oldest messages drop out of the scrollable window.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::components::thinking::{THINKING_HEIGHT, ThinkingIndicator};
use crate::tui::event::TuiEvent;

/// Blank rows between consecutive bubbles.
const MESSAGE_GAP: u16 = 1;

/// Tallest scroll canvas built per frame. Older messages beyond this much
/// scrollback leave the window.
pub const MAX_CANVAS_ROWS: u16 = 8192;

/// Scroll state for the message list. Persisted in `TuiState`.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout
            .total_height()
            .saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Whether content exists below the visible window.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.scroll_state.offset().y < self.max_offset()
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights (gap included) for a given width.
///
/// Only the newest messages that fit in [`MAX_CANVAS_ROWS`] are laid out.
/// `window_start` is the first of them.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running bottom edge of each windowed message, relative to the window.
    pub prefix_heights: Vec<u16>,
    window_start: usize,
    window_height: u32,
    content_width: u16,
    /// Extra rows below the last bubble (thinking indicator).
    trailer: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            window_start: 0,
            window_height: 0,
            content_width: 0,
            trailer: 0,
        }
    }

    /// Measure any messages not yet cached. A width change invalidates everything.
    ///
    /// Returns how many rows slid off the top of the window, so a scrolled-up
    /// view can keep its place.
    pub fn update(&mut self, history: &[Message], content_width: u16, trailer: u16) -> u16 {
        if content_width != self.content_width || self.heights.len() > history.len() {
            self.heights.clear();
            self.window_start = 0;
            self.window_height = 0;
            self.content_width = content_width;
        }
        for message in &history[self.heights.len()..] {
            let height = MessageBubble::calculate_height(message, content_width)
                .saturating_add(MESSAGE_GAP);
            self.heights.push(height);
            self.window_height += u32::from(height);
        }
        self.trailer = trailer;

        let budget = u32::from(MAX_CANVAS_ROWS.saturating_sub(trailer));
        let mut dropped: u32 = 0;
        while self.window_height > budget && self.window_start + 1 < self.heights.len() {
            let height = u32::from(self.heights[self.window_start]);
            self.window_height -= height;
            dropped += height;
            self.window_start += 1;
        }

        self.rebuild_prefix_heights();
        u16::try_from(dropped).unwrap_or(u16::MAX)
    }

    fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self.heights[self.window_start..]
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Index into the history of the first laid-out message.
    pub fn window_start(&self) -> usize {
        self.window_start
    }

    /// Rows taken by the windowed bubbles, trailer excluded.
    pub fn content_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn total_height(&self) -> u16 {
        self.content_height().saturating_add(self.trailer)
    }

    /// Window-relative indices of the messages that intersect the viewport,
    /// padded by half a viewport on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

/// Scrollable conversation view.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub history: &'a [Message],
    pub is_waiting: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        history: &'a [Message],
        is_waiting: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            history,
            is_waiting,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let trailer = if self.is_waiting { THINKING_HEIGHT } else { 0 };

        let dropped = self.state.layout.update(self.history, content_width, trailer);
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            let current = self.state.scroll_state.offset();
            if dropped > 0 {
                self.state.scroll_state.set_offset(Position {
                    x: current.x,
                    y: current.y.saturating_sub(dropped),
                });
            }
            self.state.clamp_scroll();
        }

        let layout = &self.state.layout;
        // Pinned views land on the bottom after this frame, so lay out for it now
        let scroll_offset = if self.state.stick_to_bottom {
            layout.total_height().saturating_sub(area.height)
        } else {
            self.state.scroll_state.offset().y
        };
        let visible_range = layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, layout.total_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };
        let window = &self.history[layout.window_start()..];
        for i in visible_range {
            let height = layout.heights[layout.window_start() + i];
            let rect = Rect::new(0, y_offset, content_width, height.saturating_sub(MESSAGE_GAP));
            scroll_view.render_widget(MessageBubble::new(&window[i]), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.is_waiting {
            let rect = Rect::new(0, layout.content_height(), content_width, THINKING_HEIGHT);
            scroll_view.render_widget(ThinkingIndicator::new(self.spinner_frame), rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
