//! OpenWeatherMap direct geocoding client
//!
//! Resolves a free-form city query into candidate places with coordinates,
//! which back the search flow and the initial command-line lookup.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Base URL for the OpenWeatherMap direct geocoding API
const GEOCODE_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Maximum number of candidates requested per query
const RESULT_LIMIT: u8 = 5;

/// Errors that can occur when geocoding a query
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One geocoding candidate
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPlace {
    /// Place name (e.g. "Lisbon")
    pub name: String,
    /// Latitude coordinate
    pub lat: f64,
    /// Longitude coordinate
    pub lon: f64,
    /// ISO country code (e.g. "PT")
    pub country: String,
    /// Administrative region, when the API provides one
    #[serde(default)]
    pub state: Option<String>,
}

impl GeoPlace {
    /// Display label for pick lists: "Name, State, Country" (state optional)
    pub fn label(&self) -> String {
        match self.state.as_deref() {
            Some(state) if !state.is_empty() => {
                format!("{}, {}, {}", self.name, state, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Client for resolving city queries via OpenWeatherMap geocoding
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
}

impl GeocodeClient {
    /// Creates a new GeocodeClient
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Creates a new GeocodeClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Resolves a city query to up to five candidate places
    ///
    /// # Arguments
    /// * `query` - Free-form city name (e.g. "Porto" or "Springfield,US")
    ///
    /// # Returns
    /// * `Ok(Vec<GeoPlace>)` - Candidates in API relevance order (may be empty)
    /// * `Err(GeocodeError)` - If the request or parsing fails
    pub async fn search(&self, query: &str) -> Result<Vec<GeoPlace>, GeocodeError> {
        let limit = RESULT_LIMIT.to_string();
        let response = self
            .client
            .get(GEOCODE_BASE_URL)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let text = response.text().await?;
        let places: Vec<GeoPlace> = serde_json::from_str(&text)?;

        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sample valid geocoding response
    const VALID_RESPONSE: &str = r#"[
        {
            "name": "Springfield",
            "local_names": {"en": "Springfield"},
            "lat": 39.7990175,
            "lon": -89.6439575,
            "country": "US",
            "state": "Illinois"
        },
        {
            "name": "Springfield",
            "lat": 42.1018764,
            "lon": -72.5886727,
            "country": "US",
            "state": "Massachusetts"
        },
        {
            "name": "Lisbon",
            "lat": 38.7077507,
            "lon": -9.1365919,
            "country": "PT"
        }
    ]"#;

    #[test]
    fn test_parse_valid_response() {
        let places: Vec<GeoPlace> =
            serde_json::from_str(VALID_RESPONSE).expect("Failed to parse valid response");

        assert_eq!(places.len(), 3);
        assert_eq!(places[0].name, "Springfield");
        assert!((places[0].lat - 39.7990175).abs() < 1e-6);
        assert!((places[0].lon - (-89.6439575)).abs() < 1e-6);
        assert_eq!(places[0].country, "US");
        assert_eq!(places[0].state.as_deref(), Some("Illinois"));
        assert_eq!(places[2].state, None);
    }

    #[test]
    fn test_parse_empty_response() {
        let places: Vec<GeoPlace> = serde_json::from_str("[]").expect("Failed to parse");
        assert!(places.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let result: Result<Vec<GeoPlace>, _> = serde_json::from_str("{ not an array }");
        assert!(result.is_err());
    }

    #[test]
    fn test_label_includes_state_when_present() {
        let place = GeoPlace {
            name: "Springfield".to_string(),
            lat: 0.0,
            lon: 0.0,
            country: "US".to_string(),
            state: Some("Illinois".to_string()),
        };
        assert_eq!(place.label(), "Springfield, Illinois, US");
    }

    #[test]
    fn test_label_without_state() {
        let place = GeoPlace {
            name: "Lisbon".to_string(),
            lat: 0.0,
            lon: 0.0,
            country: "PT".to_string(),
            state: None,
        };
        assert_eq!(place.label(), "Lisbon, PT");
    }

    #[test]
    fn test_label_with_empty_state() {
        let place = GeoPlace {
            name: "Lisbon".to_string(),
            lat: 0.0,
            lon: 0.0,
            country: "PT".to_string(),
            state: Some(String::new()),
        };
        assert_eq!(place.label(), "Lisbon, PT");
    }
}
