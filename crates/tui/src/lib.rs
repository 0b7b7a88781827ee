//! # ab-tui
//!
//! Terminal User Interface for api-bridge.
//!
//! This crate provides the interactive view of a simulated request travelling
//! frontend → backend → external API. It talks to `ab-core` only through the
//! `Op` and `Event` protocol defined in `ab-protocol` plus a watch receiver of
//! session snapshots.

pub mod app;
pub mod event_handler;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use ab_core::state::service::spawn_controller;
use ab_protocol::{FlowConfig, Op};
use anyhow::Result;
use tokio::sync::mpsc;

/// Run the interactive TUI until the user quits.
///
/// Spawns the controller service, hands its channels to the [`App`] and
/// waits for the service to wind down after the app sends `Shutdown`.
pub async fn run_app(config: FlowConfig) -> Result<()> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let handle = spawn_controller(config, events_tx);

    let mut tui = Tui::init()?;
    let mut app = App::new(config, handle.op_tx.clone(), handle.state_rx.clone(), events_rx);
    let result = app.run(&mut tui).await;
    tui.restore()?;

    // The app already sent Shutdown; this only covers an early error exit.
    let _ = handle.op_tx.send(Op::Shutdown);
    handle.join.await?;

    result
}
