//! Test fixtures for creating controllers and draining events.

use ab_core::state::controller::FlowController;
use ab_protocol::{Event, FlowConfig, FlowMode, FlowSession, Speed};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::watch;

/// Controller wired to an event channel.
pub fn controller_with_events(mode: FlowMode, speed: Speed) -> (FlowController, UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = FlowController::with_events(FlowConfig { mode, speed }, tx);
    (controller, rx)
}

/// Everything currently queued on `rx`.
pub fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Wait until the watched session reaches a terminal stage.
#[allow(dead_code)]
pub async fn wait_terminal(rx: &mut watch::Receiver<FlowSession>) -> FlowSession {
    rx.wait_for(|s| s.stage.is_terminal())
        .await
        .expect("controller dropped before session finished")
        .clone()
}
