pub mod catalog;
pub mod cities;
pub mod constants;
pub mod dispatcher;
pub mod formatters;
pub mod generators;
pub mod models;
pub mod service;

pub use dispatcher::{DispatchError, Dispatcher, ToolOutput};
pub use service::WeatherServer;
