//! Mock weather data generators.
//!
//! Every numeric field is drawn independently and uniformly from a fixed
//! range; only ranges and types are stable between calls.

use chrono::{DateTime, Duration, Local};
use rand::Rng;

use crate::cities::{self, UnknownCity};
use crate::constants::{
    ALERT_PROBABILITY, ALERT_TYPES, ISSUER, TEMPERATURE_UNIT, WEATHER_CONDITIONS,
    WIND_DIRECTIONS, WIND_SPEED_UNIT,
};
use crate::models::{
    Alert, AlertSet, Coordinates, CurrentTemperature, Forecast, ForecastDay, TemperatureRange,
    WeatherSnapshot, Wind,
};

/// Generates current conditions for a registered city
pub fn current_weather<R: Rng + ?Sized>(
    city: &str,
    now: DateTime<Local>,
    rng: &mut R,
) -> Result<WeatherSnapshot, UnknownCity> {
    let info = cities::lookup(city)?;

    Ok(WeatherSnapshot {
        city: info.name.to_string(),
        coordinates: Coordinates {
            latitude: info.latitude,
            longitude: info.longitude,
        },
        temperature: CurrentTemperature {
            current: uniform(rng, -5.0, 35.0),
            feels_like: uniform(rng, -5.0, 35.0),
            min: uniform(rng, -10.0, 25.0),
            max: uniform(rng, 20.0, 40.0),
            unit: TEMPERATURE_UNIT.to_string(),
        },
        conditions: pick(rng, &WEATHER_CONDITIONS).to_string(),
        humidity: rng.gen_range(30..=90),
        wind: Wind {
            speed: uniform(rng, 0.0, 30.0),
            direction: pick(rng, &WIND_DIRECTIONS).to_string(),
            unit: WIND_SPEED_UNIT.to_string(),
        },
        pressure: rng.gen_range(990..=1030),
        visibility: uniform(rng, 1.0, 10.0),
        uv_index: rng.gen_range(0..=11),
        timestamp: now,
        timezone: info.timezone.to_string(),
    })
}

/// Generates `days` consecutive daily entries starting at `now`'s date.
///
/// `days` is taken as given; bounding it is the dispatcher's job.
pub fn forecast<R: Rng + ?Sized>(
    city: &str,
    days: usize,
    now: DateTime<Local>,
    rng: &mut R,
) -> Result<Forecast, UnknownCity> {
    let info = cities::lookup(city)?;
    let today = now.date_naive();

    let forecasts = (0..days)
        .map(|offset| {
            let date = today + Duration::days(offset as i64);
            ForecastDay {
                date,
                day_of_week: date.format("%A").to_string(),
                temperature: TemperatureRange {
                    min: uniform(rng, -5.0, 20.0),
                    max: uniform(rng, 20.0, 35.0),
                    unit: TEMPERATURE_UNIT.to_string(),
                },
                conditions: pick(rng, &WEATHER_CONDITIONS).to_string(),
                precipitation_chance: rng.gen_range(0..=100),
                wind_speed: uniform(rng, 5.0, 25.0),
                humidity: rng.gen_range(40..=85),
            }
        })
        .collect();

    Ok(Forecast {
        city: info.name.to_string(),
        forecast_days: days,
        forecasts,
        generated_at: now,
    })
}

/// Generates zero alerts, or one to two alerts with probability
/// [`ALERT_PROBABILITY`].
pub fn alerts<R: Rng + ?Sized>(
    city: &str,
    now: DateTime<Local>,
    rng: &mut R,
) -> Result<AlertSet, UnknownCity> {
    let info = cities::lookup(city)?;

    let mut alerts = Vec::new();
    if rng.gen_bool(ALERT_PROBABILITY) {
        let count = rng.gen_range(1..=2);
        for _ in 0..count {
            let (kind, severity) = *pick(rng, &ALERT_TYPES);
            let start_time = now + Duration::hours(rng.gen_range(0..=6));
            let end_time = start_time + Duration::hours(rng.gen_range(6..=24));
            alerts.push(Alert {
                kind: kind.to_string(),
                severity,
                description: format!("{} in effect for {}", kind, info.name),
                start_time,
                end_time,
                issued_by: ISSUER.to_string(),
            });
        }
    }

    Ok(AlertSet {
        city: info.name.to_string(),
        alert_count: alerts.len(),
        alerts,
        checked_at: now,
    })
}

/// Uniform draw in `[low, high]`, rounded to one decimal place
fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    (rng.gen_range(low..=high) * 10.0).round() / 10.0
}

fn pick<'a, R: Rng + ?Sized, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
