//! # MessageList Component
//!
//! Scrollable, append-only view of the conversation. This is the terminal
//! implementation of the controller's `MessageLog`.
//!
//! ## Responsibilities
//!
//! - Hold the rendered entries and the typing indicator flag
//! - Auto-scroll to the newest entry on every append
//! - Let the user scroll back (which unpins auto-scroll until they return)
//! - Cache entry heights so long logs stay cheap to draw
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState`, the persistent state. Entries never change
//! after being appended, so cached heights only go stale on a width change.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::surface::{LogRole, MessageLog};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{LogEntry, Message};
use crate::tui::components::typing_indicator::{self, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Entries plus scroll state. Persisted across frames inside the controller.
pub struct MessageListState {
    entries: Vec<LogEntry>,
    loading: bool,
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// True when content exists below the viewport (drives the "↓ New" hint)
    pub has_unseen_content: bool,
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
            entries: Vec::new(),
            loading: false,
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            has_unseen_content: false,
            viewport_height: 0,
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn indicator_height(&self) -> u16 {
        if self.loading { typing_indicator::HEIGHT } else { 0 }
    }

    /// Height of everything on the scroll canvas, capped at `u16::MAX`.
    fn content_height(&self) -> u16 {
        self.layout.total().saturating_add(self.indicator_height())
    }

    fn max_offset(&self) -> u16 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl MessageLog for MessageListState {
    fn append_message(&mut self, text: &str, role: LogRole) {
        self.entries.push(LogEntry::new(text, role));
        // Reveal the newest entry even if the user had scrolled away.
        self.stick_to_bottom = true;
    }

    fn show_loading(&mut self) {
        self.loading = true;
        self.stick_to_bottom = true;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }
}

impl EventHandler for MessageListState {
    type Event = (); // scroll is handled internally

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
            }
            _ => {}
        }
        None
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with a reference to the persistent state.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, spinner_frame: usize) -> Self {
        Self {
            state,
            spinner_frame,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let state = &mut *self.state;

        // 1. Bring the layout cache up to date
        state.layout.sync(&state.entries, content_width);

        let entries_height = state.layout.total();
        let canvas_height = state.content_height();

        // 2. Pin to bottom when auto-scrolling, otherwise clamp. Done before
        // picking the visible range so the first frame after an append
        // already draws the newest entries.
        state.viewport_height = area.height;
        if state.stick_to_bottom {
            let bottom = state.max_offset();
            state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            state.clamp_scroll();
        }

        let scroll_offset = state.scroll_state.offset().y;
        let visible = state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible entries into the scroll canvas
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        // Past the canvas cap nothing can be drawn
        let mut y = state.layout.top_of(visible.start);
        for i in visible {
            if y >= canvas_height {
                break;
            }
            let height = state.layout.heights[i].min(canvas_height - y);
            let rect = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(Message::new(&state.entries[i]), rect);
            y = y.saturating_add(height);
        }

        if state.loading && entries_height < canvas_height {
            let height = typing_indicator::HEIGHT.min(canvas_height - entries_height);
            let rect = Rect::new(0, entries_height, content_width, height);
            scroll_view.render_widget(TypingIndicator::new(self.spinner_frame), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut state.scroll_state);

        let offset = state.scroll_state.offset().y;
        state.has_unseen_content = offset < canvas_height.saturating_sub(area.height);
    }
}

/// Cached entry heights for a given content width.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running sums: `prefix_heights[i]` is the bottom edge of entry `i`.
    pub prefix_heights: Vec<u16>,
    content_width: u16,
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
            content_width: 0,
        }
    }

    /// Measure any entries not yet cached. A width change invalidates all.
    pub fn sync(&mut self, entries: &[LogEntry], content_width: u16) {
        if self.content_width != content_width || self.heights.len() > entries.len() {
            self.heights.clear();
            self.prefix_heights.clear();
            self.content_width = content_width;
        }

        for entry in &entries[self.heights.len()..] {
            let height = Message::calculate_height(entry, content_width);
            let bottom = self.total().saturating_add(height);
            self.heights.push(height);
            self.prefix_heights.push(bottom);
        }
    }

    pub fn total(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Top edge of entry `index` on the canvas.
    pub fn top_of(&self, index: usize) -> u16 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or(self.total()),
        }
    }

    /// Entries intersecting the viewport, padded by half a screen each way.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let pad = viewport_height / 2;
        let top = scroll_offset.saturating_sub(pad);
        let bottom = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(pad);

        let start = self.prefix_heights.partition_point(|&end| end <= top);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < bottom)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
