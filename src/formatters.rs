use serde::Serialize;

use crate::cities::{available_cities, UnknownCity};
use crate::models::{AlertSet, Forecast, WeatherSnapshot};

/// Serializes a generated record into the text block returned to callers
pub fn format_record<T: Serialize>(record: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

/// Formats an unknown-city rejection, listing every valid city
pub fn format_unknown_city(error: &UnknownCity) -> String {
    format!("Error: {}\nAvailable cities: {}", error, available_cities())
}

/// Formats current conditions into a human-readable summary
pub fn format_current_weather(weather: &WeatherSnapshot) -> String {
    format!(
        "Current Weather for {}:\n  Temperature: {:.1}\u{00b0}C (feels like {:.1}\u{00b0}C)\n  Conditions: {}\n  Humidity: {}%\n  Wind: {:.1} {} {}\n  UV Index: {}\n",
        weather.city,
        weather.temperature.current,
        weather.temperature.feels_like,
        weather.conditions,
        weather.humidity,
        weather.wind.speed,
        weather.wind.unit,
        weather.wind.direction,
        weather.uv_index
    )
}

/// Formats a forecast into a human-readable summary
pub fn format_forecast(forecast: &Forecast) -> String {
    let mut output = format!(
        "{}-Day Forecast for {}:\n\n",
        forecast.forecast_days, forecast.city
    );
    for day in &forecast.forecasts {
        output.push_str(&format!(
            "{} ({}):\n  Temperature: {:.1}\u{00b0}C - {:.1}\u{00b0}C\n  Conditions: {}\n  Precipitation: {}%\n\n",
            day.day_of_week,
            day.date,
            day.temperature.min,
            day.temperature.max,
            day.conditions,
            day.precipitation_chance
        ));
    }
    output
}

/// Formats an alert check into a human-readable summary
pub fn format_alerts(alerts: &AlertSet) -> String {
    if alerts.alerts.is_empty() {
        return format!("No active weather alerts for {}.", alerts.city);
    }

    let mut output = format!(
        "Active Weather Alerts for {}: {}\n\n",
        alerts.city, alerts.alert_count
    );
    for alert in &alerts.alerts {
        output.push_str(&format!(
            "{} ({}):\n  {}\n  Valid: {} to {}\n\n",
            alert.kind,
            alert.severity.as_str().to_uppercase(),
            alert.description,
            alert.start_time.to_rfc3339(),
            alert.end_time.to_rfc3339()
        ));
    }
    output
}
