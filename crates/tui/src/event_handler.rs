//! Event handling utilities for the TUI.
//!
//! This module provides functions for handling different types of events:
//! - Controller events (turned into log lines)
//! - Keyboard events (turned into `Op`s)

use ab_protocol::{Event, FlowConfig, Op};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

/// Maximum number of log lines kept in memory.
pub const LOG_CAPACITY: usize = 200;

/// One log line for a controller event.
pub fn format_event(event: &Event) -> String {
    match event {
        Event::SessionStarted {
            session_id,
            query,
            mode,
            speed_factor,
        } => format!("#{session_id} start \"{query}\" ({mode}, x{speed_factor})"),
        Event::StageEntered {
            session_id,
            stage,
            stage_index,
        } => format!("#{session_id} [{stage_index}] {stage}"),
        Event::SessionCompleted { session_id, result } => format!(
            "#{session_id} complete: {} {} {}°C",
            result.icon, result.key, result.measurement
        ),
        Event::SessionFailed { session_id, error } => format!("#{session_id} ERROR: {error}"),
        Event::SessionReset { session_id } => format!("#{session_id} reset"),
    }
}

/// Append the log line for `event`, dropping the oldest lines past capacity.
pub fn handle_core_event(log: &mut Vec<String>, event: &Event) {
    log.push(format_event(event));
    if log.len() > LOG_CAPACITY {
        let excess = log.len() - LOG_CAPACITY;
        log.drain(..excess);
    }
}

/// Handle a keyboard event from the user.
///
/// `config` mirrors what the controller will use for the next session so the
/// status bar can show it before anything starts.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    query_input: &mut String,
    config: &mut FlowConfig,
    op_tx: &UnboundedSender<Op>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('r') if ctrl => {
            let _ = op_tx.send(Op::Reset);
        }
        KeyCode::Enter => {
            if !query_input.trim().is_empty() {
                let _ = op_tx.send(Op::Start {
                    query: query_input.clone(),
                });
            }
        }
        KeyCode::Tab => {
            let _ = op_tx.send(Op::Advance);
        }
        KeyCode::F(2) => {
            config.mode = config.mode.toggled();
            let _ = op_tx.send(Op::SetMode { mode: config.mode });
        }
        KeyCode::F(3) => {
            config.speed = config.speed.cycled();
            let _ = op_tx.send(Op::SetSpeed {
                speed: config.speed,
            });
        }
        KeyCode::Char(c) if !ctrl => {
            query_input.push(c);
        }
        KeyCode::Backspace => {
            query_input.pop();
        }
        _ => {}
    }

    false
}
