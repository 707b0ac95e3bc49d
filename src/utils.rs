/// Utility functions
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.trim().parse::<f64>().ok();
    }
    None
}

/// Health scores arrive as integers, floats or numeric strings depending on
/// the backend revision; normalise to 0..=100.
pub fn de_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let n = num(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid health score: {}", raw)))?;
    Ok(clamp_score(n))
}

/// Fractional scores truncate toward the lower band: 69.6 stays below the
/// `>= 70` boundary.
pub fn clamp_score(n: f64) -> u8 {
    if n.is_nan() {
        return 0;
    }
    n.floor().clamp(0.0, 100.0) as u8
}

pub fn de_ratio<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let n = num(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid ratio: {}", raw)))?;
    Ok(if n.is_nan() { 0.0 } else { n.clamp(0.0, 1.0) })
}

/// Parse the loosely formatted `last_updated` strings the service emits
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = s.parse::<DateTime<Utc>>() {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}
