//! Automatic flow driver.
//!
//! The driver walks a session through the working stages on a timer. It runs
//! as a [`SessionTask`](task::SessionTask) spawned by the controller and only
//! ever touches the session it was started for.

pub mod task;
pub mod timing;

use crate::state::session::{enter_stage, settle_stage};
use crate::state::shared::SharedSession;
use ab_protocol::WORKING_STAGES;
use std::sync::Arc;
use tracing::{debug, info};

/// Drive session `session_id` from its first working stage to a terminal one.
///
/// The session must already be on the first working stage. For every stage:
/// 1. Enter it (the first one is entered by the controller)
/// 2. Sleep for its scaled dwell time, if it has one
/// 3. Settle it: `Normalizing` may fail the session, `Complete` stores the result
///
/// A stage without dwell time is entered and settled in a single update, so
/// `Complete` is never observable without its result. The loop stops as soon
/// as the session is terminal or has been superseded.
pub(crate) async fn drive_session(shared: Arc<SharedSession>, session_id: u64, speed_factor: f64) {
    for (index, stage) in WORKING_STAGES.iter().enumerate() {
        let delay = timing::stage_delay(*stage, speed_factor);

        let Some(mut current) = shared.update(session_id, |session| {
            let mut events = Vec::new();
            if index > 0 {
                events.extend(enter_stage(session, index));
            }
            if delay.is_none() {
                events.extend(settle_stage(session));
            }
            events
        }) else {
            return;
        };

        if let Some(delay) = delay {
            debug!(session_id, %stage, ?delay, "waiting on stage");
            tokio::time::sleep(delay).await;

            let Some(settled) = shared.update(session_id, |session| {
                settle_stage(session).into_iter().collect()
            }) else {
                return;
            };
            current = settled;
        }

        if current.is_terminal() {
            info!(session_id, stage = %current, "session finished");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::create_session;
    use ab_protocol::{Event, FlowMode, Speed, Stage};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn seeded(query: &str, session_id: u64) -> (Arc<SharedSession>, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut session = create_session(session_id, query, FlowMode::Auto, Speed::Normal);
        enter_stage(&mut session, 0);
        (Arc::new(SharedSession::new(session, Some(tx))), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_to_complete() {
        let (shared, mut rx) = seeded("Roma", 1);

        drive_session(Arc::clone(&shared), 1, 1.0).await;

        let session = shared.snapshot();
        assert_eq!(session.stage, Stage::Complete);
        assert_eq!(session.result.map(|r| r.measurement), Some(22.0));

        let mut stages = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let Event::StageEntered { stage, .. } = event {
                stages.push(stage);
            }
        }
        assert_eq!(stages, WORKING_STAGES[1..].to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_stops_on_error() {
        let (shared, mut rx) = seeded("Unknown City", 1);

        drive_session(Arc::clone(&shared), 1, 1.0).await;

        let session = shared.snapshot();
        assert_eq!(session.stage, Stage::Error);
        assert!(session.error_message.is_some());
        assert!(session.result.is_none());

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert!(matches!(events.last(), Some(Event::SessionFailed { .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::StageEntered { stage: Stage::Complete, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_ignores_superseded_session() {
        let (shared, _rx) = seeded("Roma", 1);

        let driver = tokio::spawn(drive_session(Arc::clone(&shared), 1, 1.0));
        tokio::time::sleep(Duration::from_millis(900)).await;

        shared.replace(|_| {
            (
                ab_protocol::FlowSession::idle(2, FlowMode::Auto, Speed::Normal),
                Vec::new(),
            )
        });
        driver.await.unwrap();

        let session = shared.snapshot();
        assert_eq!(session.session_id, 2);
        assert_eq!(session.stage, Stage::Idle);
    }
}
