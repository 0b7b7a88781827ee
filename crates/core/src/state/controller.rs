//! The flow controller.
//!
//! The FlowController owns the one session of a simulated request and is the
//! only thing allowed to change it. Consumers read snapshots through
//! [`FlowController::state`] or a watch receiver from
//! [`FlowController::subscribe`], and optionally receive one [`Event`] per
//! transition.

use crate::engine::drive_session;
use crate::engine::task::SessionTask;
use crate::state::session::{create_session, enter_stage, started_event, step_forward};
use crate::state::shared::SharedSession;
use ab_protocol::{Event, FlowConfig, FlowMode, FlowSession, Speed};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Staged flow controller.
///
/// Every `start` and `reset` bumps the session generation and aborts the
/// previous session's driver before touching state, so at most one session
/// is ever live and no late timer can alter its successor.
pub struct FlowController {
    /// The session slot shared with the automatic driver.
    shared: Arc<SharedSession>,

    /// Mode and speed for the next session.
    config: FlowConfig,

    /// Last generation number handed out.
    generation: u64,

    /// Driver of the current automatic session, if any.
    task: Option<SessionTask>,
}

impl FlowController {
    /// Create an idle controller.
    ///
    /// # Arguments
    ///
    /// * `config` - Mode and speed for sessions started later
    pub fn new(config: FlowConfig) -> Self {
        Self::build(config, None)
    }

    /// Create an idle controller that reports every transition on `events_tx`.
    pub fn with_events(config: FlowConfig, events_tx: UnboundedSender<Event>) -> Self {
        Self::build(config, Some(events_tx))
    }

    fn build(config: FlowConfig, events_tx: Option<UnboundedSender<Event>>) -> Self {
        let initial = FlowSession::idle(0, config.mode, config.speed);
        Self {
            shared: Arc::new(SharedSession::new(initial, events_tx)),
            config,
            generation: 0,
            task: None,
        }
    }

    /// Configuration used by the next `start`.
    pub fn config(&self) -> FlowConfig {
        self.config
    }

    /// Mode for the next session. The running session keeps its own.
    pub fn set_mode(&mut self, mode: FlowMode) {
        self.config.mode = mode;
    }

    /// Speed for the next session. The running session keeps its own.
    pub fn set_speed(&mut self, speed: Speed) {
        self.config.speed = speed;
    }

    /// Start a new session for `query`.
    ///
    /// A query that is empty after trimming is ignored. Otherwise any running
    /// session is cancelled, a new one enters the first working stage, and
    /// in automatic mode a driver is spawned on the current tokio runtime.
    pub fn start(&mut self, query: &str) {
        if query.trim().is_empty() {
            debug!("ignoring start with empty query");
            return;
        }

        self.cancel_task();
        let session_id = self.next_generation();
        let FlowConfig { mode, speed } = self.config;

        self.shared.replace(|_| {
            let mut session = create_session(session_id, query, mode, speed);
            let mut events = vec![started_event(&session)];
            events.extend(enter_stage(&mut session, 0));
            (session, events)
        });
        info!(session_id, query, %mode, %speed, "session started");

        if mode == FlowMode::Auto {
            let driver = drive_session(Arc::clone(&self.shared), session_id, speed.factor());
            self.task = SessionTask::spawn(session_id, driver);
            if self.task.is_none() {
                error!(session_id, "no tokio runtime, automatic session will not advance");
            }
        }
    }

    /// Move a manual session to its next stage.
    ///
    /// Ignored for automatic sessions, idle controllers and terminal sessions.
    pub fn advance(&mut self) {
        let session_id = self.generation;
        self.shared.update(session_id, step_forward);
    }

    /// Cancel the running session and return to idle.
    pub fn reset(&mut self) {
        self.cancel_task();
        let session_id = self.next_generation();
        let FlowConfig { mode, speed } = self.config;

        self.shared.replace(|previous| {
            let events = vec![Event::SessionReset {
                session_id: previous.session_id,
            }];
            (FlowSession::idle(session_id, mode, speed), events)
        });
        debug!(session_id, "session reset");
    }

    /// Read-only snapshot of the current session.
    pub fn state(&self) -> FlowSession {
        self.shared.snapshot()
    }

    /// Receiver that sees every committed transition.
    pub fn subscribe(&self) -> watch::Receiver<FlowSession> {
        self.shared.subscribe()
    }

    /// Whether an automatic driver is still running.
    pub fn is_driving(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            debug!(session_id = task.session_id(), "cancelling driver");
            task.cancel();
        }
    }
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}
