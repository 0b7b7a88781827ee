//! Static catalog of known records.
//!
//! Entries are listed in display order; that order is also the order in
//! which known keys are suggested after a failed lookup.

use ab_protocol::Record;

/// One catalog row. Borrowed data so the table can live in a `const`.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub country: &'static str,
    pub measurement: f64,
    pub label: &'static str,
    pub humidity: u32,
    pub wind_speed: u32,
    pub icon: &'static str,
}

impl CatalogEntry {
    pub fn to_record(&self) -> Record {
        Record {
            key: self.key.to_string(),
            country: self.country.to_string(),
            measurement: self.measurement,
            label: self.label.to_string(),
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            icon: self.icon.to_string(),
        }
    }
}

pub const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        key: "Roma",
        country: "IT",
        measurement: 22.0,
        label: "Clear sky",
        humidity: 45,
        wind_speed: 12,
        icon: "☀️",
    },
    CatalogEntry {
        key: "Milano",
        country: "IT",
        measurement: 18.0,
        label: "Cloudy",
        humidity: 65,
        wind_speed: 8,
        icon: "☁️",
    },
    CatalogEntry {
        key: "Napoli",
        country: "IT",
        measurement: 25.0,
        label: "Sunny",
        humidity: 55,
        wind_speed: 15,
        icon: "🌤️",
    },
    CatalogEntry {
        key: "Londra",
        country: "UK",
        measurement: 14.0,
        label: "Light rain",
        humidity: 80,
        wind_speed: 20,
        icon: "🌧️",
    },
    CatalogEntry {
        key: "Parigi",
        country: "FR",
        measurement: 16.0,
        label: "Cloudy",
        humidity: 70,
        wind_speed: 10,
        icon: "☁️",
    },
    CatalogEntry {
        key: "Tokyo",
        country: "JP",
        measurement: 28.0,
        label: "Hot and humid",
        humidity: 85,
        wind_speed: 5,
        icon: "🌡️",
    },
    CatalogEntry {
        key: "New York",
        country: "US",
        measurement: 20.0,
        label: "Partly cloudy",
        humidity: 50,
        wind_speed: 18,
        icon: "⛅",
    },
];
