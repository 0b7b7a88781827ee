//! Runtime session models.
//!
//! This module defines the snapshot of a single flow session as consumers
//! see it, plus the two knobs that shape a session: mode and speed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::record_models::Record;
use crate::stage_models::Stage;

/// How a session moves from one stage to the next.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum FlowMode {
    /// Stages advance on their own, one timer per stage.
    #[default]
    Auto,

    /// Stages advance only on explicit `advance` calls.
    Manual,
}

impl FlowMode {
    pub fn toggled(self) -> Self {
        match self {
            FlowMode::Auto => FlowMode::Manual,
            FlowMode::Manual => FlowMode::Auto,
        }
    }
}

impl fmt::Display for FlowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowMode::Auto => f.write_str("auto"),
            FlowMode::Manual => f.write_str("manual"),
        }
    }
}

impl FromStr for FlowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Ok(FlowMode::Auto),
            "manual" => Ok(FlowMode::Manual),
            other => Err(format!("unknown mode '{other}', expected auto or manual")),
        }
    }
}

/// Named animation speed.
///
/// Each speed maps to a multiplier applied to every base stage duration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    /// Multiplier applied to base stage durations.
    pub fn factor(self) -> f64 {
        match self {
            Speed::Slow => 2.0,
            Speed::Normal => 1.0,
            Speed::Fast => 0.5,
        }
    }

    /// Next speed in the slow -> normal -> fast cycle.
    pub fn cycled(self) -> Self {
        match self {
            Speed::Slow => Speed::Normal,
            Speed::Normal => Speed::Fast,
            Speed::Fast => Speed::Slow,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Slow => f.write_str("slow"),
            Speed::Normal => f.write_str("normal"),
            Speed::Fast => f.write_str("fast"),
        }
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Speed::Slow),
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            other => Err(format!(
                "unknown speed '{other}', expected slow, normal or fast"
            )),
        }
    }
}

/// Snapshot of one flow session.
///
/// A new session is created by every `start`, and replaced by `reset` or the
/// next `start`. Consumers only ever hold clones of this struct.
///
/// Invariants kept by the controller:
/// - `stage_index` is the position of `stage` in the working order, `None`
///   while idle, and stays on `Normalizing`'s position after an error
/// - `result` is set iff `stage == Complete`
/// - `error_message` is set iff `stage == Error`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct FlowSession {
    /// Generation number of this session.
    ///
    /// Strictly increases with every `start` and `reset` on the same
    /// controller. Timers carry the id they were scheduled for and are
    /// ignored once it no longer matches.
    pub session_id: u64,

    /// Current stage.
    pub stage: Stage,

    /// Position of `stage` in the working order.
    pub stage_index: Option<usize>,

    /// The query as typed by the user.
    pub query: String,

    /// Mode captured when the session started.
    pub mode: FlowMode,

    /// Speed multiplier captured when the session started.
    pub speed_factor: f64,

    /// Normalized record, once the session is complete.
    pub result: Option<Record>,

    /// Human-readable failure, once the session has failed.
    pub error_message: Option<String>,

    /// Wall-clock time the session started.
    pub started_at: Option<DateTime<Utc>>,
}

impl FlowSession {
    /// An idle session with the given generation number.
    pub fn idle(session_id: u64, mode: FlowMode, speed: Speed) -> Self {
        Self {
            session_id,
            stage: Stage::Idle,
            stage_index: None,
            query: String::new(),
            mode,
            speed_factor: speed.factor(),
            result: None,
            error_message: None,
            started_at: None,
        }
    }

    /// Whether the session has started and not yet reached an end state.
    pub fn is_active(&self) -> bool {
        self.stage != Stage::Idle && !self.stage.is_terminal()
    }
}

impl Default for FlowSession {
    fn default() -> Self {
        Self::idle(0, FlowMode::default(), Speed::default())
    }
}
