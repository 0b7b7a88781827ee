//! Flow session state machine.
//!
//! This module provides functions for moving a [`FlowSession`] through its
//! lifecycle. Each function mutates the session in place and returns the
//! events describing what changed; callers decide how to publish them.
//!
//! None of these functions panic or fail: a transition that is not allowed
//! from the current state simply returns no events.

use crate::error::FlowError;
use crate::resolver;
use ab_protocol::{Event, FlowMode, FlowSession, Record, Speed, Stage, WORKING_STAGES};
use chrono::Utc;

/// Create a new session for `query`, not yet on any working stage.
///
/// # Arguments
///
/// * `session_id` - Generation number for the new session
/// * `query` - The query exactly as typed
/// * `mode` - Mode captured for the session's lifetime
/// * `speed` - Speed captured for the session's lifetime
pub fn create_session(session_id: u64, query: &str, mode: FlowMode, speed: Speed) -> FlowSession {
    FlowSession {
        query: query.to_string(),
        started_at: Some(Utc::now()),
        ..FlowSession::idle(session_id, mode, speed)
    }
}

/// Event announcing a freshly created session.
pub fn started_event(session: &FlowSession) -> Event {
    Event::SessionStarted {
        session_id: session.session_id,
        query: session.query.clone(),
        mode: session.mode,
        speed_factor: session.speed_factor,
    }
}

/// Move the session onto working stage `index`.
///
/// Only the stage directly after the current one may be entered, and never
/// from a terminal stage. Returns `None` when the move is not allowed.
pub fn enter_stage(session: &mut FlowSession, index: usize) -> Option<Event> {
    if session.stage.is_terminal() {
        return None;
    }

    let expected = session.stage_index.map_or(0, |current| current + 1);
    if index != expected {
        return None;
    }

    let stage = *WORKING_STAGES.get(index)?;
    session.stage = stage;
    session.stage_index = Some(index);

    Some(Event::StageEntered {
        session_id: session.session_id,
        stage,
        stage_index: index,
    })
}

/// Evaluate the boundary of the current stage.
///
/// - On `Normalizing`, an unresolvable query fails the session.
/// - On `Complete`, the normalized record is stored as the result.
///
/// Every other stage passes through unconditionally.
pub fn settle_stage(session: &mut FlowSession) -> Option<Event> {
    match session.stage {
        Stage::Normalizing => match resolver::resolve(&session.query) {
            Ok(_) => None,
            Err(error) => Some(fail_session(session, &error)),
        },
        Stage::Complete if session.result.is_none() => match resolver::resolve(&session.query) {
            Ok(record) => Some(complete_session(session, resolver::normalize(&record))),
            Err(error) => Some(fail_session(session, &error)),
        },
        _ => None,
    }
}

/// Manual single step: enter the next stage and settle it at once.
///
/// Does nothing for idle, terminal or automatic sessions.
pub fn step_forward(session: &mut FlowSession) -> Vec<Event> {
    if session.mode != FlowMode::Manual || !session.is_active() {
        return Vec::new();
    }

    let next = session.stage_index.map_or(0, |current| current + 1);
    let mut events: Vec<Event> = enter_stage(session, next).into_iter().collect();
    if !events.is_empty() {
        events.extend(settle_stage(session));
    }
    events
}

/// Mark the session complete with `record` and emit the completion event.
fn complete_session(session: &mut FlowSession, record: Record) -> Event {
    session.stage = Stage::Complete;
    session.result = Some(record.clone());
    session.error_message = None;

    Event::SessionCompleted {
        session_id: session.session_id,
        result: record,
    }
}

/// Mark the session failed and emit the failure event.
///
/// `stage_index` is left on the stage that failed.
fn fail_session(session: &mut FlowSession, error: &FlowError) -> Event {
    let message = error.to_string();
    session.stage = Stage::Error;
    session.result = None;
    session.error_message = Some(message.clone());

    Event::SessionFailed {
        session_id: session.session_id,
        error: message,
    }
}
