use crate::models::Severity;

/// Server name reported during MCP initialization
pub const SERVER_NAME: &str = "mock-weather-server";

/// Attribution stamped on every generated alert
pub const ISSUER: &str = "Mock Weather Service";

pub const TEMPERATURE_UNIT: &str = "celsius";
pub const WIND_SPEED_UNIT: &str = "km/h";

/// Weather conditions a snapshot or forecast day may report
pub const WEATHER_CONDITIONS: [&str; 9] = [
    "Sunny",
    "Partly Cloudy",
    "Cloudy",
    "Rainy",
    "Stormy",
    "Snowy",
    "Foggy",
    "Windy",
    "Clear",
];

pub const WIND_DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Alert archetypes, drawn with replacement
pub const ALERT_TYPES: [(&str, Severity); 5] = [
    ("Heat Warning", Severity::Moderate),
    ("Storm Watch", Severity::Severe),
    ("Fog Advisory", Severity::Minor),
    ("Wind Warning", Severity::Moderate),
    ("Heavy Rain Alert", Severity::Moderate),
];

/// Probability that an alert check reports anything at all
pub const ALERT_PROBABILITY: f64 = 0.3;

pub const MIN_FORECAST_DAYS: i64 = 1;
pub const MAX_FORECAST_DAYS: i64 = 7;
pub const DEFAULT_FORECAST_DAYS: i64 = 5;
