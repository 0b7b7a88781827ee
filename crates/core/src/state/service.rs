//! Controller service loop.
//!
//! Puts a [`FlowController`] behind a single task that applies [`Op`]s in
//! arrival order. Presentation layers hold a [`ControllerHandle`] and never
//! see the controller itself.

use crate::state::controller::FlowController;
use ab_protocol::{Event, FlowConfig, FlowSession, Op};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Consumer side of a running controller service.
pub struct ControllerHandle {
    /// Commands for the controller.
    pub op_tx: UnboundedSender<Op>,

    /// Latest committed session snapshot.
    pub state_rx: watch::Receiver<FlowSession>,

    /// The service task. Resolves once `Op::Shutdown` is processed.
    pub join: JoinHandle<()>,
}

/// Spawn a controller service on the current runtime.
///
/// # Arguments
///
/// * `config` - Mode and speed for the first session
/// * `events_tx` - Channel receiving one event per transition
pub fn spawn_controller(config: FlowConfig, events_tx: UnboundedSender<Event>) -> ControllerHandle {
    let controller = FlowController::with_events(config, events_tx);
    let state_rx = controller.subscribe();
    let (op_tx, op_rx) = mpsc::unbounded_channel();

    let join = tokio::spawn(async move {
        run_controller(controller, op_rx).await;
    });

    ControllerHandle {
        op_tx,
        state_rx,
        join,
    }
}

/// Apply operations to `controller` until `Shutdown` or until every sender
/// is gone. Dropping the controller on exit cancels any running driver.
pub async fn run_controller(mut controller: FlowController, mut op_rx: UnboundedReceiver<Op>) {
    while let Some(op) = op_rx.recv().await {
        debug!(?op, "controller op");
        match op {
            Op::Start { query } => controller.start(&query),
            Op::Advance => controller.advance(),
            Op::Reset => controller.reset(),
            Op::SetMode { mode } => controller.set_mode(mode),
            Op::SetSpeed { speed } => controller.set_speed(speed),
            Op::Shutdown => break,
        }
    }
}
