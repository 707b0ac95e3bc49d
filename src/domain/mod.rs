/// Domain models for the application
use crate::classify::{score_to_health_color, status_to_severity_color, HealthBand, Severity};
use crate::utils::{de_ratio, de_score, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Status label attached by the service to a city or analysis.
///
/// Labels outside the known set are preserved verbatim in `Unknown` so they
/// can still be displayed; they classify to the neutral tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Saludable,
    Moderado,
    Critico,
    Unknown(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Saludable => "SALUDABLE",
            Status::Moderado => "MODERADO",
            Status::Critico => "CRÍTICO",
            Status::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SALUDABLE" => Status::Saludable,
            "MODERADO" => Status::Moderado,
            "CRÍTICO" => Status::Critico,
            _ => Status::Unknown(raw),
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        Status::from(raw.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Catalog entry for a monitored city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub status: Status,
    #[serde(deserialize_with = "de_score")]
    pub health_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasa_events_count: Option<u32>,
}

impl City {
    pub fn severity(&self) -> Severity {
        status_to_severity_color(self.status.as_str())
    }

    pub fn health_band(&self) -> HealthBand {
        score_to_health_color(i64::from(self.health_score))
    }

    /// First word of the name, as shown on the selector buttons
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// One year of the blue/orange light history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub year: i32,
    #[serde(deserialize_with = "de_ratio")]
    pub blue_ratio: f64,
    #[serde(deserialize_with = "de_ratio")]
    pub orange_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasaEvent {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthImagery {
    #[serde(default)]
    pub image_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NighttimeData {
    #[serde(default)]
    pub has_night_data: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidsData {
    #[serde(default)]
    pub asteroids_today: u32,
}

/// Detailed light-pollution report for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default, alias = "id")]
    pub city_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    pub status: Status,
    #[serde(deserialize_with = "de_score")]
    pub health_score: u8,
    #[serde(deserialize_with = "de_ratio")]
    pub blue_ratio: f64,
    #[serde(deserialize_with = "de_ratio")]
    pub orange_ratio: f64,
    #[serde(default)]
    pub history: Vec<HistoryPoint>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub data_sources: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nasa_events: Option<Vec<NasaEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_imagery: Option<EarthImagery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nighttime_data: Option<NighttimeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asteroids_data: Option<AsteroidsData>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub last_updated: String,
}

impl Analysis {
    pub fn severity(&self) -> Severity {
        status_to_severity_color(self.status.as_str())
    }

    pub fn health_band(&self) -> HealthBand {
        score_to_health_color(i64::from(self.health_score))
    }

    /// The blue and orange shares are expected to cover the whole spectrum.
    pub fn ratios_consistent(&self) -> bool {
        ((self.blue_ratio + self.orange_ratio) - 1.0).abs() <= 0.02
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_updated)
    }

    pub fn nasa_events(&self) -> &[NasaEvent] {
        self.nasa_events.as_deref().unwrap_or(&[])
    }
}

/// Summary of the upstream NASA feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NasaStatus {
    #[serde(default)]
    pub data_sources_operational: Vec<String>,
    #[serde(default)]
    pub active_events: u32,
    #[serde(default)]
    pub asteroids_today: u32,
}
