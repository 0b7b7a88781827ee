//! Timeline widget showing the working stages as a table.
//!
//! Each row is one working stage with its actor, progress marker and the
//! dwell time it gets at the session's speed.

use crate::widgets::stage_copy::stage_copy;
use ab_core::engine::timing::stage_delay;
use ab_protocol::{FlowMode, FlowSession, Stage, WORKING_STAGES};
use ratatui::layout::Constraint;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Cell;
use ratatui::widgets::Row;
use ratatui::widgets::Table;
use ratatui::widgets::TableState;
use ratatui::Frame;

/// Progress of one working stage relative to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageProgress {
    Done,
    Active,
    Failed,
    Pending,
}

/// Where `index` stands in `session`.
pub fn stage_progress(session: &FlowSession, index: usize) -> StageProgress {
    match (session.stage, session.stage_index) {
        (Stage::Error, Some(current)) if index == current => StageProgress::Failed,
        (Stage::Complete, Some(current)) if index <= current => StageProgress::Done,
        (_, Some(current)) if index < current => StageProgress::Done,
        (_, Some(current)) if index == current => StageProgress::Active,
        _ => StageProgress::Pending,
    }
}

/// Renders the working stages with the current one highlighted.
///
/// # Arguments
/// * `frame` - The frame to render into
/// * `area` - The area to render the table in
/// * `session` - Snapshot to render
pub fn render_timeline(frame: &mut Frame, area: Rect, session: &FlowSession) {
    let rows: Vec<Row> = WORKING_STAGES
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            let copy = stage_copy(*stage);
            let (marker, style) = match stage_progress(session, index) {
                StageProgress::Done => ("✔", Style::default().fg(Color::Green)),
                StageProgress::Active => (
                    "▶",
                    Style::default().fg(copy.color).add_modifier(Modifier::BOLD),
                ),
                StageProgress::Failed => ("✘", Style::default().fg(Color::Red)),
                StageProgress::Pending => ("·", Style::default().fg(Color::DarkGray)),
            };

            let dwell = match session.mode {
                FlowMode::Auto => stage_delay(*stage, session.speed_factor)
                    .map(|d| format!("{}ms", d.as_millis()))
                    .unwrap_or_default(),
                FlowMode::Manual => "step".to_string(),
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(format!("{} {}", copy.icon, copy.title)),
                Cell::from(copy.actor),
                Cell::from(dwell),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Stage"),
        Cell::from("Actor"),
        Cell::from("Time"),
    ])
    .style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Cyan),
    );

    let widths = [
        Constraint::Length(2),
        Constraint::Percentage(50),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let title = format!("Flow - {} ({})", session.stage, session.mode);
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    let mut table_state = TableState::default();
    if session.is_active() {
        table_state.select(session.stage_index);
    }

    frame.render_stateful_widget(table, area, &mut table_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_protocol::Speed;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn session(stage: Stage, mode: FlowMode) -> FlowSession {
        let mut session = FlowSession::idle(1, mode, Speed::Normal);
        session.stage = stage;
        session.stage_index = stage.working_index().or(match stage {
            Stage::Error => Stage::Normalizing.working_index(),
            _ => None,
        });
        session
    }

    fn render_to_string(session: &FlowSession) -> (String, Terminal<TestBackend>) {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_timeline(frame, area, session);
            })
            .unwrap();
        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        (content, terminal)
    }

    #[test]
    fn test_progress_markers() {
        let s = session(Stage::CallingExternal, FlowMode::Auto);
        assert_eq!(stage_progress(&s, 0), StageProgress::Done);
        assert_eq!(stage_progress(&s, 2), StageProgress::Active);
        assert_eq!(stage_progress(&s, 3), StageProgress::Pending);

        let failed = session(Stage::Error, FlowMode::Auto);
        assert_eq!(stage_progress(&failed, 3), StageProgress::Done);
        assert_eq!(stage_progress(&failed, 4), StageProgress::Failed);
        assert_eq!(stage_progress(&failed, 5), StageProgress::Pending);

        let done = session(Stage::Complete, FlowMode::Auto);
        assert_eq!(stage_progress(&done, 5), StageProgress::Done);

        let idle = session(Stage::Idle, FlowMode::Auto);
        assert_eq!(stage_progress(&idle, 0), StageProgress::Pending);
    }

    #[test]
    fn test_render_timeline_lists_stages() {
        let (content, _) = render_to_string(&session(Stage::Idle, FlowMode::Auto));

        assert!(content.contains("Stage"));
        assert!(content.contains("Send"));
        assert!(content.contains("Normalize"));
        assert!(content.contains("1200ms"));
    }

    #[test]
    fn test_render_timeline_manual_shows_steps() {
        let (content, _) = render_to_string(&session(Stage::Sending, FlowMode::Manual));
        assert!(content.contains("step"));
        assert!(content.contains("manual"));
    }

    #[test]
    fn test_render_timeline_highlights_active_stage() {
        let (_, terminal) = render_to_string(&session(Stage::BackendProcessing, FlowMode::Auto));
        let buffer = terminal.backend().buffer();

        let mut found_blue_bg = false;
        for y in 0..buffer.area().height {
            for x in 0..buffer.area().width {
                if buffer[(x, y)].bg == Color::Blue {
                    found_blue_bg = true;
                }
            }
        }

        assert!(found_blue_bg, "Active stage row should be highlighted");
    }
}
