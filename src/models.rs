use chrono::{DateTime, Local, NaiveDate};
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::constants::DEFAULT_FORECAST_DAYS;

// ============================================================================
// Generated Weather Records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTemperature {
    pub current: f64,
    pub feels_like: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub direction: String,
    pub unit: String,
}

/// Current conditions for a single city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub coordinates: Coordinates,
    pub temperature: CurrentTemperature,
    pub conditions: String,
    pub humidity: u8,
    pub wind: Wind,
    pub pressure: u16,
    pub visibility: f64,
    pub uv_index: u8,
    pub timestamp: DateTime<Local>,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub temperature: TemperatureRange,
    pub conditions: String,
    pub precipitation_chance: u8,
    pub wind_speed: f64,
    pub humidity: u8,
}

/// Daily forecast entries, ordered by date starting today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub forecast_days: usize,
    pub forecasts: Vec<ForecastDay>,
    pub generated_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub description: String,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub issued_by: String,
}

/// Result of an alert check; `alert_count` always mirrors `alerts.len()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSet {
    pub city: String,
    pub alert_count: usize,
    pub alerts: Vec<Alert>,
    pub checked_at: DateTime<Local>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CityRequest {
    /// City name
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ForecastRequest {
    /// City name
    pub city: String,
    /// Number of days to forecast (1-7)
    #[serde(default = "default_forecast_days", deserialize_with = "saturating_days")]
    #[schemars(with = "i64", range(min = 1, max = 7))]
    pub days: i64,
}

fn default_forecast_days() -> i64 {
    DEFAULT_FORECAST_DAYS
}

/// Accepts any integral JSON number, saturating at the `i64` bounds so that
/// oversized requests still clamp instead of failing.
fn saturating_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(days) = number.as_i64() {
        return Ok(days);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        Some(days) if days.fract() == 0.0 => Ok(days as i64),
        _ => Err(de::Error::custom(format!(
            "expected a whole number of days, got {}",
            number
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn days_of(value: serde_json::Value) -> Result<i64, serde_json::Error> {
        serde_json::from_value::<ForecastRequest>(value).map(|request| request.days)
    }

    #[test]
    fn days_default_when_absent() {
        assert_eq!(days_of(json!({"city": "Paris"})).unwrap(), 5);
    }

    #[test]
    fn oversized_days_saturate() {
        assert_eq!(days_of(json!({"city": "Paris", "days": u64::MAX})).unwrap(), i64::MAX);

        let huge: serde_json::Value =
            serde_json::from_str(r#"{"city": "Paris", "days": -100000000000000000000000}"#).unwrap();
        assert_eq!(days_of(huge).unwrap(), i64::MIN);
    }

    #[test]
    fn fractional_or_textual_days_are_rejected() {
        assert!(days_of(json!({"city": "Paris", "days": 2.5})).is_err());
        assert!(days_of(json!({"city": "Paris", "days": "three"})).is_err());
    }
}
