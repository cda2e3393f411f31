//! Example client: spawns the weather server over stdio, discovers its tools
//! and prints readable summaries of each result.

use anyhow::{Context, Result};
use clap::Parser;
use mock_weather_server::catalog::{GET_CURRENT_WEATHER, GET_WEATHER_ALERTS, GET_WEATHER_FORECAST};
use mock_weather_server::formatters::{format_alerts, format_current_weather, format_forecast};
use mock_weather_server::models::{AlertSet, Forecast, WeatherSnapshot};
use rmcp::{
    model::{CallToolRequestParam, CallToolResult},
    service::RunningService,
    transport::TokioChildProcess,
    RoleClient, ServiceExt,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::process::Command;

/// Walk through every tool the mock weather server offers
#[derive(Parser, Debug)]
#[command(name = "weather-client")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the server binary (defaults to mock-weather-server next to this one)
    #[arg(short, long)]
    server: Option<PathBuf>,

    /// City for the current-weather request
    #[arg(long, default_value = "New York")]
    city: String,

    /// City for the forecast request
    #[arg(long, default_value = "London")]
    forecast_city: String,

    /// Days to forecast; the server clamps this to 1-7
    #[arg(short, long, default_value_t = 3)]
    days: i64,

    /// City for the alerts request
    #[arg(long, default_value = "Tokyo")]
    alerts_city: String,
}

type Client = RunningService<RoleClient, ()>;

fn default_server_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate current executable")?;
    Ok(exe.with_file_name(format!("mock-weather-server{}", std::env::consts::EXE_SUFFIX)))
}

fn banner(title: &str) {
    println!("{}", "=".repeat(50));
    println!("{}", title);
    println!("{}", "=".repeat(50));
}

/// Extracts the single text block a tool call returns
fn text_of(result: &CallToolResult) -> Result<String> {
    let value = serde_json::to_value(result)?;
    value["content"][0]["text"]
        .as_str()
        .map(str::to_string)
        .context("tool returned no text content")
}

async fn call(client: &Client, name: &'static str, arguments: Value) -> Result<String> {
    let result = client
        .call_tool(CallToolRequestParam {
            name: name.into(),
            arguments: arguments.as_object().cloned(),
        })
        .await
        .with_context(|| format!("{} failed", name))?;
    text_of(&result)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let server = match cli.server {
        Some(path) => path,
        None => default_server_path()?,
    };

    let transport = TokioChildProcess::new(Command::new(&server))
        .with_context(|| format!("failed to spawn {}", server.display()))?;
    let client = ().serve(transport).await?;
    println!("Connected to weather MCP server\n");

    let tools = client.list_tools(Default::default()).await?;
    println!("Available tools ({}):", tools.tools.len());
    for tool in &tools.tools {
        println!(
            "  - {}: {}",
            tool.name,
            tool.description.as_deref().unwrap_or_default()
        );
    }
    println!();

    banner(&format!("Current weather for {}", cli.city));
    let text = call(&client, GET_CURRENT_WEATHER, json!({ "city": cli.city })).await?;
    match serde_json::from_str::<WeatherSnapshot>(&text) {
        Ok(weather) => println!("{}", format_current_weather(&weather)),
        Err(_) => println!("{}\n", text),
    }

    banner(&format!("{}-day forecast for {}", cli.days, cli.forecast_city));
    let text = call(
        &client,
        GET_WEATHER_FORECAST,
        json!({ "city": cli.forecast_city, "days": cli.days }),
    )
    .await?;
    match serde_json::from_str::<Forecast>(&text) {
        Ok(forecast) => print!("{}", format_forecast(&forecast)),
        Err(_) => println!("{}\n", text),
    }

    banner(&format!("Weather alerts for {}", cli.alerts_city));
    let text = call(&client, GET_WEATHER_ALERTS, json!({ "city": cli.alerts_city })).await?;
    match serde_json::from_str::<AlertSet>(&text) {
        Ok(alerts) => println!("{}\n", format_alerts(&alerts)),
        Err(_) => println!("{}\n", text),
    }

    banner("Error handling (invalid city)");
    let text = call(&client, GET_CURRENT_WEATHER, json!({ "city": "InvalidCity" })).await?;
    println!("{}\n", text);

    client.cancel().await?;
    Ok(())
}
