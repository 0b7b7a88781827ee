//! Stage models.
//!
//! A simulated request walks a fixed, totally ordered list of working
//! stages. `Idle` precedes the list; `Complete` and `Error` end it.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// One named point in the lifecycle of a simulated request.
///
/// The normal progression is:
/// Idle -> Sending -> BackendProcessing -> CallingExternal
/// -> ExternalResponding -> Normalizing -> Complete
///
/// `Error` is only reachable from `Normalizing`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// No session is running.
    #[default]
    Idle,

    /// The frontend is sending the request to the backend proxy.
    Sending,

    /// The backend reads its credentials and validates the request.
    BackendProcessing,

    /// The backend is calling the third-party service.
    CallingExternal,

    /// The third-party service is answering with its raw payload.
    ExternalResponding,

    /// The backend converts the raw payload into the flat record.
    ///
    /// This is where an unknown query turns into `Error`.
    Normalizing,

    /// The normalized record is ready for display.
    Complete,

    /// The query could not be resolved.
    Error,
}

/// The working stages, in the only order a session may visit them.
pub const WORKING_STAGES: [Stage; 6] = [
    Stage::Sending,
    Stage::BackendProcessing,
    Stage::CallingExternal,
    Stage::ExternalResponding,
    Stage::Normalizing,
    Stage::Complete,
];

impl Stage {
    /// Position of this stage in [`WORKING_STAGES`].
    ///
    /// `Idle` and `Error` are not working stages and return `None`.
    pub fn working_index(self) -> Option<usize> {
        WORKING_STAGES.iter().position(|s| *s == self)
    }

    /// Whether the session has reached an end state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Complete | Stage::Error)
    }

    /// Kebab-case tag, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Sending => "sending",
            Stage::BackendProcessing => "backend-processing",
            Stage::CallingExternal => "calling-external",
            Stage::ExternalResponding => "external-responding",
            Stage::Normalizing => "normalizing",
            Stage::Complete => "complete",
            Stage::Error => "error",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_index_follows_order() {
        for (i, stage) in WORKING_STAGES.iter().enumerate() {
            assert_eq!(stage.working_index(), Some(i));
        }
        assert_eq!(Stage::Idle.working_index(), None);
        assert_eq!(Stage::Error.working_index(), None);
    }

    #[test]
    fn test_terminal_stages() {
        assert!(Stage::Complete.is_terminal());
        assert!(Stage::Error.is_terminal());
        assert!(!Stage::Idle.is_terminal());
        assert!(!Stage::Normalizing.is_terminal());
    }

    #[test]
    fn test_display_matches_serde() {
        for stage in WORKING_STAGES.iter().chain([Stage::Idle, Stage::Error].iter()) {
            let json = serde_json::to_value(stage).unwrap();
            assert_eq!(json, stage.to_string());
        }
    }
}
