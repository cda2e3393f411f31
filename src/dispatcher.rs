use chrono::{DateTime, Local};
use rand::RngCore;
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::{self, ToolDescriptor, ToolEntry};

/// Failures that abort an invocation instead of producing a response body
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{parameter} parameter is required")]
    MissingParameter { tool: String, parameter: String },

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidParameter { tool: String, reason: String },

    #[error("Failed to encode result: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Text body of a completed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// The generated record
    Record(String),
    /// An input the caller can correct, with the valid alternatives
    Rejected(String),
}

impl ToolOutput {
    pub fn text(&self) -> &str {
        match self {
            ToolOutput::Record(text) | ToolOutput::Rejected(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ToolOutput::Record(text) | ToolOutput::Rejected(text) => text,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ToolOutput::Rejected(_))
    }
}

/// Routes tool invocations to their handlers after checking arguments
/// against the declared schema. Holds no state beyond the catalog.
pub struct Dispatcher {
    tools: Vec<ToolEntry>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            tools: catalog::entries(),
        }
    }

    pub fn list_tools(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|entry| &entry.descriptor)
    }

    pub fn call_tool(
        &self,
        name: &str,
        arguments: &JsonObject,
        now: DateTime<Local>,
        rng: &mut dyn RngCore,
    ) -> Result<ToolOutput, DispatchError> {
        let entry = self
            .tools
            .iter()
            .find(|entry| entry.descriptor.name == name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        check_required(&entry.descriptor, arguments)?;

        (entry.handler)(arguments, now, rng)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Null values and empty strings count as absent
fn check_required(descriptor: &ToolDescriptor, arguments: &JsonObject) -> Result<(), DispatchError> {
    for parameter in descriptor.required() {
        let present = match arguments.get(parameter) {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.is_empty(),
            Some(_) => true,
        };
        if !present {
            return Err(DispatchError::MissingParameter {
                tool: descriptor.name.to_string(),
                parameter: parameter.to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn parse_arguments<T: DeserializeOwned>(
    tool: &str,
    arguments: &JsonObject,
) -> Result<T, DispatchError> {
    serde_json::from_value(Value::Object(arguments.clone())).map_err(|e| {
        DispatchError::InvalidParameter {
            tool: tool.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{GET_CURRENT_WEATHER, GET_WEATHER_ALERTS, GET_WEATHER_FORECAST};
    use crate::cities::CITIES;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    const TOOLS: [&str; 3] = [GET_CURRENT_WEATHER, GET_WEATHER_FORECAST, GET_WEATHER_ALERTS];

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 11, 4, 15, 0, 0).unwrap()
    }

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(object) => object,
            other => panic!("not an object: {other}"),
        }
    }

    fn call(name: &str, arguments: Value, seed: u64) -> Result<ToolOutput, DispatchError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Dispatcher::new().call_tool(name, &args(arguments), now(), &mut rng)
    }

    #[test]
    fn lists_three_tools() {
        let dispatcher = Dispatcher::new();
        let names: Vec<_> = dispatcher.list_tools().map(|d| d.name).collect();
        assert_eq!(names, TOOLS);
    }

    #[test]
    fn unknown_tool_is_a_hard_failure() {
        let err = call("get_moon_phase", json!({"city": "Paris"}), 0).unwrap_err();
        assert!(matches!(&err, DispatchError::UnknownTool(name) if name == "get_moon_phase"));
        assert_eq!(err.to_string(), "Unknown tool: get_moon_phase");
    }

    #[test]
    fn missing_city_is_a_hard_failure() {
        for tool in TOOLS {
            for arguments in [json!({}), json!({"city": null}), json!({"city": ""})] {
                let err = call(tool, arguments, 0).unwrap_err();
                match err {
                    DispatchError::MissingParameter { tool: t, parameter } => {
                        assert_eq!(t, tool);
                        assert_eq!(parameter, "city");
                    }
                    other => panic!("unexpected error: {other}"),
                }
            }
        }
    }

    #[test]
    fn whitespace_city_is_a_soft_failure() {
        for tool in TOOLS {
            let output = call(tool, json!({"city": "  "}), 0).unwrap();
            assert!(output.is_rejected());
            assert!(output
                .text()
                .starts_with("Error: City '  ' not found in database\nAvailable cities: New York"));
        }
    }

    #[test]
    fn mistyped_arguments_are_invalid() {
        let err = call(GET_CURRENT_WEATHER, json!({"city": 42}), 0).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParameter { .. }));

        let err = call(GET_WEATHER_FORECAST, json!({"city": "Paris", "days": "three"}), 0)
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidParameter { .. }));
    }

    #[test]
    fn unknown_city_is_a_soft_failure_for_every_tool() {
        for tool in TOOLS {
            let output = call(tool, json!({"city": "Atlantis"}), 0).unwrap();
            assert!(output.is_rejected());
            let text = output.text();
            assert!(text.starts_with("Error: City 'Atlantis' not found in database"));
            for city in &CITIES {
                assert!(text.contains(city.name), "{tool} omitted {}", city.name);
            }
        }
    }

    #[test]
    fn valid_city_is_echoed_by_every_tool() {
        for tool in TOOLS {
            for city in &CITIES {
                let output = call(tool, json!({"city": city.name}), 5).unwrap();
                assert!(!output.is_rejected());
                let body: Value = serde_json::from_str(output.text()).unwrap();
                assert_eq!(body["city"], json!(city.name));
            }
        }
    }

    #[test]
    fn forecast_defaults_to_five_days() {
        let output = call(GET_WEATHER_FORECAST, json!({"city": "Tokyo"}), 2).unwrap();
        let body: Value = serde_json::from_str(output.text()).unwrap();
        assert_eq!(body["forecast_days"], json!(5));
        assert_eq!(body["forecasts"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn forecast_days_are_clamped() {
        for seed in 0..5 {
            let over = call(GET_WEATHER_FORECAST, json!({"city": "Paris", "days": 10}), seed);
            let max = call(GET_WEATHER_FORECAST, json!({"city": "Paris", "days": 7}), seed);
            assert_eq!(over.unwrap(), max.unwrap());

            let under = call(GET_WEATHER_FORECAST, json!({"city": "Paris", "days": 0}), seed);
            let min = call(GET_WEATHER_FORECAST, json!({"city": "Paris", "days": 1}), seed);
            assert_eq!(under.unwrap(), min.unwrap());
        }

        for seed in 0..3 {
            let beyond_i64 = call(
                GET_WEATHER_FORECAST,
                json!({"city": "Paris", "days": 9_223_372_036_854_775_808_u64}),
                seed,
            );
            let max = call(GET_WEATHER_FORECAST, json!({"city": "Paris", "days": 7}), seed);
            assert_eq!(beyond_i64.unwrap(), max.unwrap());
        }

        let negative = call(GET_WEATHER_FORECAST, json!({"city": "Paris", "days": -4}), 0).unwrap();
        let body: Value = serde_json::from_str(negative.text()).unwrap();
        assert_eq!(body["forecast_days"], json!(1));
    }

    #[test]
    fn three_day_forecast_starts_today() {
        let output = call(GET_WEATHER_FORECAST, json!({"city": "London", "days": 3}), 9).unwrap();
        let body: Value = serde_json::from_str(output.text()).unwrap();
        let dates: Vec<_> = body["forecasts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|day| day["date"].as_str().unwrap().to_string())
            .collect();

        let today = now().date_naive();
        let expected: Vec<_> = (0..3)
            .map(|i| (today + Duration::days(i)).format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn alert_count_always_matches() {
        let dispatcher = Dispatcher::new();
        let mut rng = StdRng::seed_from_u64(99);
        let arguments = args(json!({"city": "Singapore"}));
        for _ in 0..200 {
            let output = dispatcher
                .call_tool(GET_WEATHER_ALERTS, &arguments, now(), &mut rng)
                .unwrap();
            let body: Value = serde_json::from_str(output.text()).unwrap();
            let alerts = body["alerts"].as_array().unwrap();
            assert_eq!(body["alert_count"], json!(alerts.len()));
        }
    }
}
