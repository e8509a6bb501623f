use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::Timestamp;

/// One reading reported by a monitoring device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    #[serde(rename = "ID", alias = "id")]
    pub id: u64,
    /// Body temperature in °C.
    pub temperature: f64,
    /// Ambient humidity in %.
    pub humidity: f64,
    /// Pulse rate in BPM.
    pub pulse_rate: f64,
    /// Ambient light in lux.
    pub light_intensity: f64,
    pub user_id: u64,
    #[serde(rename = "CreatedAt", alias = "createdAt", default)]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "UpdatedAt", alias = "updatedAt", default)]
    pub updated_at: Option<Timestamp>,
}

impl Vitals {
    /// Reads one metric from the record.
    #[must_use]
    pub fn value(&self, kind: VitalKind) -> f64 {
        match kind {
            VitalKind::Temperature => self.temperature,
            VitalKind::Humidity => self.humidity,
            VitalKind::PulseRate => self.pulse_rate,
            VitalKind::LightIntensity => self.light_intensity,
        }
    }
}

/// Payload for `POST /vitals`, normally sent by devices rather than people.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateVitalsRequest {
    pub temperature: f64,
    pub humidity: f64,
    pub pulse_rate: f64,
    pub light_intensity: f64,
    pub user_id: u64,
}

/// Filters for `GET /vitals`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VitalsQuery {
    pub user_id: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl VitalsQuery {
    /// Restricts the listing to one user.
    #[must_use]
    pub fn for_user(user_id: u64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Query pairs for the filters that are set, in a stable order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(user_id) = self.user_id.filter(|id| *id != 0) {
            pairs.push(("userId", user_id.to_string()));
        }
        if let Some(start) = self.start_date.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("startDate", start.clone()));
        }
        if let Some(end) = self.end_date.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("endDate", end.clone()));
        }
        pairs
    }
}

/// The four metrics a reading carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalKind {
    Temperature,
    Humidity,
    PulseRate,
    LightIntensity,
}

impl VitalKind {
    /// All metrics in dashboard order.
    pub const ALL: [Self; 4] = [
        Self::Temperature,
        Self::Humidity,
        Self::PulseRate,
        Self::LightIntensity,
    ];

    /// Label shown on charts and cards.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::PulseRate => "PulseRate",
            Self::LightIntensity => "LightIntensity",
        }
    }

    /// Measurement unit.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::PulseRate => "BPM",
            Self::LightIntensity => "lux",
        }
    }

    /// Formats `value` with the metric's precision and unit, e.g. `36.6°C` or `72 BPM`.
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::Temperature | Self::Humidity => format!("{value:.1}{}", self.unit()),
            Self::PulseRate | Self::LightIntensity => format!("{value:.0} {}", self.unit()),
        }
    }
}

impl fmt::Display for VitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VitalKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "temperature" | "temp" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "pulserate" | "pulse" => Ok(Self::PulseRate),
            "lightintensity" | "light" => Ok(Self::LightIntensity),
            _ => Err(format!("unknown vital metric: {value}")),
        }
    }
}
