//! Synthetic payloads shown for each stage.
//!
//! Nothing here touches the network. The bodies mimic what a frontend, a
//! backend proxy and a third-party weather service would exchange, so the
//! presentation layer can show "what is on the wire" at every stage.

use crate::resolver::{self, normalize_query};
use ab_protocol::{FlowSession, Record, Stage};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const KELVIN_OFFSET: f64 = 273.15;
const KMH_PER_MS: f64 = 3.6;

/// Nested response shape returned by the imaginary third-party service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub name: String,
    pub sys: RawSys,
    pub main: RawMain,
    pub weather: Vec<RawCondition>,
    pub wind: RawWind,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawSys {
    pub country: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawMain {
    /// Kelvin, one decimal.
    pub temp: f64,
    pub humidity: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawCondition {
    pub description: String,
    pub icon: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawWind {
    /// Metres per second, one decimal.
    pub speed: f64,
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl RawResponse {
    /// Dress a catalog record up as the service's raw answer.
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.key.clone(),
            sys: RawSys {
                country: record.country.clone(),
            },
            main: RawMain {
                temp: round_tenth(record.measurement + KELVIN_OFFSET),
                humidity: record.humidity,
            },
            weather: vec![RawCondition {
                description: record.label.to_lowercase(),
                icon: record.icon.clone(),
            }],
            wind: RawWind {
                speed: round_tenth(f64::from(record.wind_speed) / KMH_PER_MS),
            },
        }
    }

    /// Flatten into a display record: Kelvin to Celsius, m/s to km/h.
    pub fn normalize(&self) -> Record {
        let condition = self.weather.first();
        Record {
            key: self.name.clone(),
            country: self.sys.country.clone(),
            measurement: (self.main.temp - KELVIN_OFFSET).round(),
            label: condition
                .map(|c| capitalize(&c.description))
                .unwrap_or_default(),
            humidity: self.main.humidity,
            wind_speed: (self.wind.speed * KMH_PER_MS).round() as u32,
            icon: condition.map(|c| c.icon.clone()).unwrap_or_default(),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Payload to display for the session's current stage.
///
/// Returns `None` while idle.
pub fn payload_for(session: &FlowSession) -> Option<Value> {
    let query = session.query.trim();
    let resolved = resolver::resolve(query).ok();

    let body = match session.stage {
        Stage::Idle => return None,
        Stage::Sending => json!({
            "from": "frontend",
            "to": "backend",
            "method": "POST",
            "path": "/api/weather",
            "body": { "city": query },
        }),
        Stage::BackendProcessing => json!({
            "from": "backend",
            "apiKey": "read from WEATHER_API_KEY",
            "validated": !query.is_empty(),
            "city": query,
        }),
        Stage::CallingExternal => json!({
            "from": "backend",
            "to": "external",
            "method": "GET",
            "url": format!(
                "https://api.weather.example/v1/current?q={}&units=standard",
                normalize_query(query)
            ),
            "apiKey": "********",
        }),
        Stage::ExternalResponding => match &resolved {
            Some(record) => serde_json::to_value(RawResponse::from_record(record)).ok()?,
            None => json!({ "cod": "404", "message": "city not found" }),
        },
        Stage::Normalizing => match &resolved {
            Some(record) => transformations(&RawResponse::from_record(record)),
            None => json!({ "cod": "404", "message": "city not found" }),
        },
        Stage::Complete => serde_json::to_value(session.result.as_ref()?).ok()?,
        Stage::Error => json!({
            "error": session.error_message.as_deref().unwrap_or_default(),
        }),
    };

    Some(body)
}

/// Field-by-field view of what normalization changes.
fn transformations(raw: &RawResponse) -> Value {
    let flat = raw.normalize();
    json!([
        {
            "field": "measurement",
            "raw": format!("{} K", raw.main.temp),
            "normalized": format!("{} °C", flat.measurement),
            "rule": "K - 273.15",
        },
        {
            "field": "windSpeed",
            "raw": format!("{} m/s", raw.wind.speed),
            "normalized": format!("{} km/h", flat.wind_speed),
            "rule": "m/s × 3.6",
        },
        {
            "field": "humidity",
            "raw": format!("{}%", raw.main.humidity),
            "normalized": format!("{}%", flat.humidity),
            "rule": "unchanged",
        },
        {
            "field": "structure",
            "raw": "nested",
            "normalized": "flat",
            "rule": "flatten sys/main/weather/wind",
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_protocol::{FlowMode, Speed, WORKING_STAGES};

    fn session_at(stage: Stage, query: &str) -> FlowSession {
        let mut session = FlowSession::idle(1, FlowMode::Manual, Speed::Normal);
        session.stage = stage;
        session.stage_index = stage.working_index();
        session.query = query.to_string();
        session
    }

    #[test]
    fn test_raw_response_units() {
        let record = resolver::resolve("Roma").unwrap();
        let raw = RawResponse::from_record(&record);

        assert!((raw.main.temp - 295.15).abs() < 0.1);
        assert_eq!(raw.wind.speed, 3.3);
        assert_eq!(raw.sys.country, "IT");
        assert_eq!(raw.weather[0].description, "clear sky");
    }

    #[test]
    fn test_raw_response_normalizes_back_to_catalog() {
        for key in resolver::known_keys() {
            let record = resolver::normalize(&resolver::resolve(key).unwrap());
            let flat = RawResponse::from_record(&record).normalize();

            assert_eq!(flat.measurement, record.measurement, "{key}");
            assert_eq!(flat.wind_speed, record.wind_speed, "{key}");
            assert_eq!(flat.label, record.label, "{key}");
        }
    }

    #[test]
    fn test_idle_has_no_payload() {
        assert!(payload_for(&session_at(Stage::Idle, "Roma")).is_none());
    }

    #[test]
    fn test_every_working_stage_has_payload() {
        for stage in WORKING_STAGES.iter().filter(|s| **s != Stage::Complete) {
            let payload = payload_for(&session_at(*stage, "Milano"));
            assert!(payload.is_some(), "no payload for {stage}");
        }
    }

    #[test]
    fn test_sending_payload_carries_query() {
        let payload = payload_for(&session_at(Stage::Sending, " Tokyo ")).unwrap();
        assert_eq!(payload["body"]["city"], "Tokyo");
    }

    #[test]
    fn test_unknown_query_responds_404() {
        let payload = payload_for(&session_at(Stage::ExternalResponding, "Atlantis")).unwrap();
        assert_eq!(payload["cod"], "404");
    }

    #[test]
    fn test_complete_payload_is_result() {
        let mut session = session_at(Stage::Complete, "Roma");
        session.result = Some(resolver::resolve("Roma").unwrap());

        let payload = payload_for(&session).unwrap();
        assert_eq!(payload["key"], "Roma");
        assert_eq!(payload["windSpeed"], 12);
    }

    #[test]
    fn test_error_payload_carries_message() {
        let mut session = session_at(Stage::Error, "Atlantis");
        session.error_message = Some("nope".to_string());

        let payload = payload_for(&session).unwrap();
        assert_eq!(payload["error"], "nope");
    }
}
