use thiserror::Error;

/// Reference data for a city the server can report on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: &'static str,
}

/// The fixed registry, in the order it is advertised to callers
pub const CITIES: [City; 8] = [
    City {
        name: "New York",
        latitude: 40.7128,
        longitude: -74.0060,
        timezone: "America/New_York",
    },
    City {
        name: "London",
        latitude: 51.5074,
        longitude: -0.1278,
        timezone: "Europe/London",
    },
    City {
        name: "Tokyo",
        latitude: 35.6762,
        longitude: 139.6503,
        timezone: "Asia/Tokyo",
    },
    City {
        name: "Paris",
        latitude: 48.8566,
        longitude: 2.3522,
        timezone: "Europe/Paris",
    },
    City {
        name: "Sydney",
        latitude: -33.8688,
        longitude: 151.2093,
        timezone: "Australia/Sydney",
    },
    City {
        name: "Dubai",
        latitude: 25.2048,
        longitude: 55.2708,
        timezone: "Asia/Dubai",
    },
    City {
        name: "Singapore",
        latitude: 1.3521,
        longitude: 103.8198,
        timezone: "Asia/Singapore",
    },
    City {
        name: "San Francisco",
        latitude: 37.7749,
        longitude: -122.4194,
        timezone: "America/Los_Angeles",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("City '{0}' not found in database")]
pub struct UnknownCity(pub String);

/// Looks up a city by exact name
pub fn lookup(name: &str) -> Result<&'static City, UnknownCity> {
    CITIES
        .iter()
        .find(|city| city.name == name)
        .ok_or_else(|| UnknownCity(name.to_string()))
}

/// Comma-separated city names, used in schema descriptions and error bodies
pub fn available_cities() -> String {
    CITIES
        .iter()
        .map(|city| city.name)
        .collect::<Vec<_>>()
        .join(", ")
}
