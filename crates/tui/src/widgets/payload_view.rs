//! Payload view: what is on the wire at the current stage.
//!
//! Shows the stage's explanation followed by its synthetic JSON payload in a
//! scrollable paragraph.

use crate::widgets::stage_copy::stage_copy;
use ab_core::payload::payload_for;
use ab_protocol::FlowSession;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

/// Widget for the current stage's payload with scrolling support.
#[derive(Debug, Default)]
pub struct PayloadView {
    /// Current scroll offset (number of lines scrolled from the top).
    pub scroll_offset: usize,
}

impl PayloadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines to display for `session`.
    pub fn lines(session: &FlowSession) -> Vec<Line<'static>> {
        let copy = stage_copy(session.stage);
        let mut lines = vec![Line::from(Span::styled(
            format!("{} {}", copy.icon, copy.message),
            Style::default().fg(copy.color).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(copy.details.iter().map(|d| Line::from(format!("  {d}"))));
        lines.push(Line::from(""));

        match payload_for(session).and_then(|p| serde_json::to_string_pretty(&p).ok()) {
            Some(json) => lines.extend(json.lines().map(|l| Line::from(l.to_string()))),
            None => lines.push(Line::from("Type a city and press Enter.")),
        }
        lines
    }

    /// Render the payload of `session`.
    pub fn render(&self, frame: &mut Frame, area: Rect, session: &FlowSession) {
        let lines = Self::lines(session);
        let total_lines = lines.len();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Payload - {}", stage_copy(session.stage).actor));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, area);

        let visible_lines = area.height.saturating_sub(2) as usize;
        if total_lines > visible_lines {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(total_lines)
                .viewport_content_length(visible_lines)
                .position(self.scroll_offset);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line, never past `max`.
    pub fn scroll_down(&mut self, max: usize) {
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }
}
