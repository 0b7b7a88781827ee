//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that mirrors the controller's
//! latest snapshot and runs the event loop using `tokio::select!`.

use anyhow::Result;
use ab_protocol::{Event, FlowConfig, FlowSession, Op};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::select;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio_stream::StreamExt;

use crate::event_handler;
use crate::tui::{Tui, TuiEvent};
use crate::widgets::timeline::render_timeline;
use crate::widgets::PayloadView;

/// Main TUI application state.
pub struct App {
    /// Latest snapshot received from the controller.
    pub session: FlowSession,
    /// Mode and speed the next session will use.
    pub config: FlowConfig,
    /// Query being typed.
    pub query_input: String,
    /// Rendered controller events, oldest first.
    pub log: Vec<String>,
    pub payload_view: PayloadView,
    /// Channel to send operations to the controller.
    pub op_tx: UnboundedSender<Op>,
    /// Snapshots committed by the controller.
    pub state_rx: watch::Receiver<FlowSession>,
    /// Transition events from the controller.
    pub event_rx: UnboundedReceiver<Event>,
    /// Flag to indicate if the application should exit.
    pub should_exit: bool,
}

impl App {
    /// Create a new App with communication channels.
    pub fn new(
        config: FlowConfig,
        op_tx: UnboundedSender<Op>,
        state_rx: watch::Receiver<FlowSession>,
        event_rx: UnboundedReceiver<Event>,
    ) -> Self {
        let session = state_rx.borrow().clone();
        Self {
            session,
            config,
            query_input: String::new(),
            log: Vec::new(),
            payload_view: PayloadView::new(),
            op_tx,
            state_rx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Redraws after every snapshot, controller event and key press.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.draw(|frame| self.render(frame))?;

        while !self.should_exit {
            select! {
                changed = self.state_rx.changed() => {
                    if changed.is_err() {
                        // Controller is gone; nothing left to show.
                        break;
                    }
                    let session = self.state_rx.borrow_and_update().clone();
                    self.apply_snapshot(session);
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(&event);
                }
                Some(tui_event) = tui_events.next() => {
                    if let TuiEvent::Key(key_event) = tui_event {
                        self.handle_key_event(key_event);
                    }
                }
            }
            tui.draw(|frame| self.render(frame))?;
        }

        let _ = self.op_tx.send(Op::Shutdown);
        Ok(())
    }

    /// Take a new snapshot; the payload scrolls back up on stage changes.
    fn apply_snapshot(&mut self, session: FlowSession) {
        if session.stage != self.session.stage {
            self.payload_view.scroll_to_top();
        }
        self.session = session;
    }

    fn handle_core_event(&mut self, event: &Event) {
        event_handler::handle_core_event(&mut self.log, event);
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::PageUp => self.payload_view.scroll_up(),
            KeyCode::PageDown => self.payload_view.scroll_down(usize::from(u16::MAX)),
            _ => {
                self.should_exit = event_handler::handle_keyboard_event(
                    key_event,
                    &mut self.query_input,
                    &mut self.config,
                    &self.op_tx,
                );
            }
        }
    }

    /// Render the TUI.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Input (top), flow + payload (middle), event log (bottom)
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(8),
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        self.render_input(frame, chunks[0]);
        render_timeline(frame, middle[0], &self.session);
        self.payload_view.render(frame, middle[1], &self.session);
        self.render_log(frame, chunks[2]);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "City [{} / {}]  Enter start · Tab step · ^R reset · F2 mode · F3 speed · Esc quit",
            self.config.mode, self.config.speed
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        let paragraph = Paragraph::new(format!("> {}", self.query_input))
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(paragraph, area);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Events");

        let visible = area.height.saturating_sub(2) as usize;
        let start = self.log.len().saturating_sub(visible);
        let lines: Vec<Line> = self.log[start..]
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
