//! Resolved record model.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The flat record a successful session ends with.
///
/// Records are produced by the resolver and never mutated afterwards;
/// normalization returns a new value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Display key, e.g. `"New York"`.
    pub key: String,

    /// ISO-like country code.
    pub country: String,

    /// Primary reading, in display units (degrees Celsius).
    pub measurement: f64,

    /// Short human-readable description of the reading.
    pub label: String,

    /// Relative humidity, in percent.
    pub humidity: u32,

    /// Wind speed, in km/h.
    pub wind_speed: u32,

    /// Pictogram shown next to the record.
    pub icon: String,
}
