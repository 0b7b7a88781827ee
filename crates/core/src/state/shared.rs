//! The single owned session slot.
//!
//! Every mutation of the session goes through [`SharedSession::update`],
//! which holds the watch channel's write lock for the duration of the change
//! and refuses to touch a session whose id does not match. Events are
//! published while the lock is held, so their order is the mutation order.

use ab_protocol::{Event, FlowSession, Stage};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::{debug, warn};

pub(crate) struct SharedSession {
    state: watch::Sender<FlowSession>,
    events_tx: Option<UnboundedSender<Event>>,
}

impl SharedSession {
    pub(crate) fn new(initial: FlowSession, events_tx: Option<UnboundedSender<Event>>) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state, events_tx }
    }

    pub(crate) fn snapshot(&self) -> FlowSession {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<FlowSession> {
        self.state.subscribe()
    }

    /// Apply `f` to the session if it is still session `session_id`.
    ///
    /// Returns the stage after the update, or `None` when the id is stale.
    pub(crate) fn update<F>(&self, session_id: u64, f: F) -> Option<Stage>
    where
        F: FnOnce(&mut FlowSession) -> Vec<Event>,
    {
        let mut outcome = None;

        self.state.send_if_modified(|session| {
            if session.session_id != session_id {
                return false;
            }
            let events = f(session);
            outcome = Some(session.stage);
            self.publish(events)
        });

        if outcome.is_none() {
            warn!(session_id, "dropping update for superseded session");
        }
        outcome
    }

    /// Swap in a whole new session, whatever the current id.
    pub(crate) fn replace<F>(&self, f: F)
    where
        F: FnOnce(&FlowSession) -> (FlowSession, Vec<Event>),
    {
        self.state.send_modify(|session| {
            let (next, events) = f(session);
            *session = next;
            self.publish(events);
        });
    }

    /// Send events in order. Returns whether there was anything to send.
    fn publish(&self, events: Vec<Event>) -> bool {
        let changed = !events.is_empty();
        for event in events {
            debug!(session_id = event.session_id(), ?event, "flow event");
            if let Some(tx) = &self.events_tx {
                // A consumer that went away is not the controller's problem.
                let _ = tx.send(event);
            }
        }
        changed
    }
}
