//! OpenWeatherMap 5-day forecast client
//!
//! Fetches the 3-hour-resolution forecast for a coordinate pair and exposes
//! the raw response shape consumed by the aggregation pipeline.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Base URL for the OpenWeatherMap 5-day/3-hour forecast API
const FORECAST_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One raw 3-hour forecast observation
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    /// Unix timestamp of the observation
    #[allow(dead_code)]
    pub dt: i64,
    /// Combined date-time string ("YYYY-MM-DD HH:MM:SS")
    pub dt_txt: String,
    /// Thermal readings
    pub main: MainReadings,
    /// Condition descriptors; the first entry is the primary one
    pub weather: Vec<WeatherDesc>,
    /// Wind readings
    pub wind: Wind,
    /// Probability of precipitation, 0.0-1.0
    #[serde(default)]
    pub pop: f64,
}

/// Thermal readings for one sample
#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    /// Temperature in °C (metric units requested)
    pub temp: f64,
    /// Feels-like temperature in °C
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
}

/// One condition descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDesc {
    /// Icon code (e.g. "10d")
    pub icon: String,
    /// Human-readable description (e.g. "light rain")
    pub description: String,
}

/// Wind readings for one sample
#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    /// Wind speed in m/s
    pub speed: f64,
    /// Wind direction in degrees
    pub deg: f64,
}

/// City metadata attached to the forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct CityInfo {
    /// Resolved city name
    pub name: String,
    /// Offset from UTC in seconds
    pub timezone: i32,
    /// Sunrise unix timestamp
    pub sunrise: i64,
    /// Sunset unix timestamp
    pub sunset: i64,
}

/// Raw forecast response: chronological sample list plus city metadata
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Chronological 3-hourly samples, roughly five days' worth
    pub list: Vec<ForecastSample>,
    /// Metadata for the resolved city
    pub city: CityInfo,
}

/// Client for fetching forecast data from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    api_key: String,
    units: String,
}

impl ForecastClient {
    /// Creates a new ForecastClient with default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            units: "metric".to_string(),
        }
    }

    /// Creates a new ForecastClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            units: "metric".to_string(),
        }
    }

    /// Overrides the requested unit system ("metric", "imperial", "standard")
    #[allow(dead_code)]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Fetches the 5-day/3-hour forecast for the given coordinates
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(ForecastResponse)` - The raw forecast for the location
    /// * `Err(ForecastError)` - If the request or parsing fails
    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<ForecastResponse, ForecastError> {
        let url = format!(
            "{}?lat={}&lon={}&appid={}&units={}",
            FORECAST_BASE_URL, lat, lon, self.api_key, self.units
        );

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        let forecast: ForecastResponse = serde_json::from_str(&text)?;

        Ok(forecast)
    }
}
