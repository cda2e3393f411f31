//! The fixed tool catalog: one entry per invocable operation, pairing its
//! declared input schema with the handler that serves it.

use chrono::{DateTime, Local};
use rand::RngCore;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use crate::cities::{available_cities, UnknownCity};
use crate::constants::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS};
use crate::dispatcher::{parse_arguments, DispatchError, ToolOutput};
use crate::formatters::{format_record, format_unknown_city};
use crate::generators;
use crate::models::{CityRequest, ForecastRequest};

pub const GET_CURRENT_WEATHER: &str = "get_current_weather";
pub const GET_WEATHER_FORECAST: &str = "get_weather_forecast";
pub const GET_WEATHER_ALERTS: &str = "get_weather_alerts";

pub type ToolHandler =
    fn(&JsonObject, DateTime<Local>, &mut dyn RngCore) -> Result<ToolOutput, DispatchError>;

/// Name, description and input contract of a tool, as shown to callers
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: JsonObject,
}

impl ToolDescriptor {
    /// Parameters the schema marks as required
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }
}

impl From<&ToolDescriptor> for Tool {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Tool::new(
            descriptor.name,
            descriptor.description,
            descriptor.input_schema.clone(),
        )
    }
}

pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    pub handler: ToolHandler,
}

/// Builds the catalog in advertised order
pub fn entries() -> Vec<ToolEntry> {
    vec![
        ToolEntry {
            descriptor: ToolDescriptor {
                name: GET_CURRENT_WEATHER,
                description: "Get current weather conditions for a specific city. Returns temperature, conditions, humidity, wind, and other metrics.",
                input_schema: input_schema::<CityRequest>(),
            },
            handler: current_weather,
        },
        ToolEntry {
            descriptor: ToolDescriptor {
                name: GET_WEATHER_FORECAST,
                description: "Get weather forecast for a specific city for the next 1-7 days. Returns daily forecasts with temperature ranges, conditions, and precipitation chances.",
                input_schema: input_schema::<ForecastRequest>(),
            },
            handler: weather_forecast,
        },
        ToolEntry {
            descriptor: ToolDescriptor {
                name: GET_WEATHER_ALERTS,
                description: "Get active weather alerts and warnings for a specific city. Returns any severe weather warnings, watches, or advisories.",
                input_schema: input_schema::<CityRequest>(),
            },
            handler: weather_alerts,
        },
    ]
}

/// Derives a tool's input schema from its request type and lists the valid
/// cities in the `city` description.
fn input_schema<T: JsonSchema>() -> JsonObject {
    let mut schema = match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(object)) => object,
        _ => JsonObject::new(),
    };

    if let Some(Value::Object(city)) = schema
        .get_mut("properties")
        .and_then(|properties| properties.get_mut("city"))
    {
        city.insert(
            "description".to_string(),
            Value::String(format!("City name. Available cities: {}", available_cities())),
        );
    }
    schema
}

fn current_weather(
    arguments: &JsonObject,
    now: DateTime<Local>,
    rng: &mut dyn RngCore,
) -> Result<ToolOutput, DispatchError> {
    let request: CityRequest = parse_arguments(GET_CURRENT_WEATHER, arguments)?;
    tracing::info!("Getting current weather for city: {}", request.city);

    respond(generators::current_weather(&request.city, now, rng))
}

fn weather_forecast(
    arguments: &JsonObject,
    now: DateTime<Local>,
    rng: &mut dyn RngCore,
) -> Result<ToolOutput, DispatchError> {
    let request: ForecastRequest = parse_arguments(GET_WEATHER_FORECAST, arguments)?;

    let days = request.days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS);
    if days != request.days {
        tracing::debug!("Clamped forecast days from {} to {}", request.days, days);
    }
    tracing::info!("Getting {}-day forecast for city: {}", days, request.city);

    respond(generators::forecast(&request.city, days as usize, now, rng))
}

fn weather_alerts(
    arguments: &JsonObject,
    now: DateTime<Local>,
    rng: &mut dyn RngCore,
) -> Result<ToolOutput, DispatchError> {
    let request: CityRequest = parse_arguments(GET_WEATHER_ALERTS, arguments)?;
    tracing::info!("Getting alerts for city: {}", request.city);

    respond(generators::alerts(&request.city, now, rng))
}

/// Unknown cities become a readable rejection rather than a protocol error
fn respond<T: Serialize>(generated: Result<T, UnknownCity>) -> Result<ToolOutput, DispatchError> {
    match generated {
        Ok(record) => Ok(ToolOutput::Record(format_record(&record)?)),
        Err(error) => Ok(ToolOutput::Rejected(format_unknown_city(&error))),
    }
}
