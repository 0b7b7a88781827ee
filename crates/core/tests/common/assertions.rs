//! Custom assertion helpers for flow controller tests.

use ab_protocol::{Event, FlowSession, Stage, WORKING_STAGES};

/// Stages entered, in event order.
pub fn entered_stages(events: &[Event]) -> Vec<Stage> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::StageEntered { stage, .. } => Some(*stage),
            _ => None,
        })
        .collect()
}

/// Assert the snapshot invariants that must hold after every transition.
pub fn assert_session_invariants(session: &FlowSession) {
    match session.stage {
        Stage::Idle => assert_eq!(session.stage_index, None, "idle must have no index"),
        Stage::Error => assert_eq!(
            session.stage_index,
            Stage::Normalizing.working_index(),
            "error is only reachable from normalizing"
        ),
        stage => assert_eq!(session.stage_index, stage.working_index()),
    }

    assert_eq!(
        session.result.is_some(),
        session.stage == Stage::Complete,
        "result must be set iff complete: {session:?}"
    );
    assert_eq!(
        session.error_message.is_some(),
        session.stage == Stage::Error,
        "error message must be set iff error: {session:?}"
    );
}

/// Assert one session's events form a valid, gap-free run.
///
/// Checks that:
/// 1. SessionStarted comes first
/// 2. Stages are entered in working order without skips
/// 3. Exactly one SessionCompleted or SessionFailed ends the run
pub fn assert_event_sequence(events: &[Event]) {
    assert!(!events.is_empty(), "Event sequence is empty");

    assert!(
        matches!(events[0], Event::SessionStarted { .. }),
        "First event should be SessionStarted, got: {:?}",
        events[0]
    );

    let stages = entered_stages(events);
    assert_eq!(stages, WORKING_STAGES[..stages.len()].to_vec());

    let terminal = events
        .iter()
        .filter(|e| matches!(e, Event::SessionCompleted { .. } | Event::SessionFailed { .. }))
        .count();
    assert_eq!(terminal, 1, "expected exactly one terminal event");
    assert!(matches!(
        events.last(),
        Some(Event::SessionCompleted { .. } | Event::SessionFailed { .. })
    ));
}
