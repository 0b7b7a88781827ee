//! Controller communication protocol.
//!
//! This module defines the message types exchanged between a flow controller
//! and the presentation layers that drive it.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from a consumer (TUI, CLI) to the controller
//! - `Event`: Notifications sent from the controller after each transition
//!
//! Consumers never mutate session state themselves; they send an `Op` and
//! read the resulting snapshot or `Event`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::record_models::Record;
use crate::session_models::{FlowMode, Speed};
use crate::stage_models::Stage;

/// Operations sent from a consumer to the flow controller.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "start",
///   "payload": { "query": "New York" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Start a new session for `query`, cancelling any running one.
    Start { query: String },

    /// Move a manual session to its next stage.
    Advance,

    /// Cancel the running session and go back to idle.
    Reset,

    /// Mode for the next session.
    SetMode { mode: FlowMode },

    /// Speed for the next session.
    SetSpeed { speed: Speed },

    /// Stop the controller service.
    Shutdown,
}

/// Events sent from the flow controller to its consumers.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "stageEntered",
///   "payload": {
///     "session_id": 3,
///     "stage": "calling-external",
///     "stage_index": 2
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A new session has started.
    SessionStarted {
        session_id: u64,
        query: String,
        mode: FlowMode,
        speed_factor: f64,
    },

    /// The session has moved to a new working stage.
    StageEntered {
        session_id: u64,
        stage: Stage,
        stage_index: usize,
    },

    /// The session reached `Complete`.
    SessionCompleted { session_id: u64, result: Record },

    /// The session reached `Error`.
    SessionFailed { session_id: u64, error: String },

    /// The session was cancelled by a reset.
    SessionReset { session_id: u64 },
}

impl Event {
    /// Id of the session this event belongs to.
    pub fn session_id(&self) -> u64 {
        match self {
            Event::SessionStarted { session_id, .. }
            | Event::StageEntered { session_id, .. }
            | Event::SessionCompleted { session_id, .. }
            | Event::SessionFailed { session_id, .. }
            | Event::SessionReset { session_id } => *session_id,
        }
    }
}
