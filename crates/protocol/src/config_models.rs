//! Flow configuration models for `.api-bridge/config.toml`.
//!
//! Only the named mode and speed are configurable. The stage list, base
//! durations and speed table are compile-time constants.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

use crate::session_models::{FlowMode, Speed};

/// Represents settings from `.api-bridge/config.toml`.
///
/// # Example
///
/// ```toml
/// # .api-bridge/config.toml
/// mode = "manual"
/// speed = "fast"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
pub struct FlowConfig {
    /// How new sessions advance.
    #[serde(default)]
    pub mode: FlowMode,

    /// Named speed for automatic sessions.
    #[serde(default)]
    pub speed: Speed,
}
