//! Stage timing table.

use ab_protocol::{Stage, WORKING_STAGES};
use std::time::Duration;

/// Base dwell time of `stage` in milliseconds, before the speed factor.
///
/// `Complete`, `Idle` and `Error` have no dwell time.
pub fn base_millis(stage: Stage) -> Option<u64> {
    let millis = match stage {
        Stage::Sending => 800,
        Stage::BackendProcessing => 1000,
        Stage::CallingExternal => 1000,
        Stage::ExternalResponding => 800,
        Stage::Normalizing => 1200,
        Stage::Idle | Stage::Complete | Stage::Error => return None,
    };
    Some(millis)
}

/// Base dwell time of `stage` in automatic mode.
pub fn base_duration(stage: Stage) -> Option<Duration> {
    base_millis(stage).map(Duration::from_millis)
}

/// Dwell time of `stage` scaled by `speed_factor`, rounded to whole milliseconds.
pub fn stage_delay(stage: Stage, speed_factor: f64) -> Option<Duration> {
    base_millis(stage).map(|millis| {
        let scaled = (millis as f64 * speed_factor.max(0.0)).round() as u64;
        Duration::from_millis(scaled)
    })
}

/// Time from `start` to a terminal stage in automatic mode.
pub fn total_duration(speed_factor: f64) -> Duration {
    WORKING_STAGES
        .iter()
        .filter_map(|stage| stage_delay(*stage, speed_factor))
        .sum()
}
