//! OpenWeatherMap UV index client
//!
//! Fetches the current UV index for a coordinate pair and classifies it into
//! the bands shown on the UV index card.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Base URL for the OpenWeatherMap UV index API
const UV_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/uvi";

/// Errors that can occur when fetching the UV index
#[derive(Debug, Error)]
pub enum UvError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Classification bands for the UV index card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvClass {
    VeryLow,
    Low,
    High,
    VeryHigh,
    Extreme,
    OutOfRange,
}

impl UvClass {
    /// Classifies a raw UV value into its display band
    pub fn from_value(value: f64) -> Self {
        if (0.0..=20.0).contains(&value) {
            UvClass::VeryLow
        } else if value > 20.0 && value <= 40.0 {
            UvClass::Low
        } else if value > 40.0 && value <= 60.0 {
            UvClass::High
        } else if value > 60.0 && value <= 80.0 {
            UvClass::VeryHigh
        } else if value > 80.0 && value <= 100.0 {
            UvClass::Extreme
        } else {
            UvClass::OutOfRange
        }
    }

    /// Label shown on the UV card
    pub fn label(&self) -> &'static str {
        match self {
            UvClass::VeryLow => "Very low",
            UvClass::Low => "Low",
            UvClass::High => "High",
            UvClass::VeryHigh => "Very high",
            UvClass::Extreme => "Extreme",
            UvClass::OutOfRange => "Out of range",
        }
    }
}

/// UV index value plus its classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvReport {
    /// Raw UV index value
    pub value: f64,
    /// Display classification of the value
    pub classification: UvClass,
}

/// UV index response body
#[derive(Debug, Deserialize)]
struct UvResponse {
    value: f64,
}

/// Client for fetching the UV index from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct UvClient {
    client: Client,
    api_key: String,
}

impl UvClient {
    /// Creates a new UvClient
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Creates a new UvClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Fetches and classifies the UV index for the given coordinates
    pub async fn fetch_uv(&self, lat: f64, lon: f64) -> Result<UvReport, UvError> {
        let url = format!(
            "{}?lat={}&lon={}&appid={}",
            UV_BASE_URL, lat, lon, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        let body: UvResponse = serde_json::from_str(&text)?;

        Ok(UvReport {
            value: body.value,
            classification: UvClass::from_value(body.value),
        })
    }
}
