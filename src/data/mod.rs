//! Data layer for Skycast
//!
//! API clients for geocoding, forecast and UV index, plus the shared
//! presentation helpers that turn raw API fields into displayable values.

pub mod forecast;
pub mod geocode;
pub mod uv;

pub use forecast::{ForecastClient, ForecastError, ForecastResponse, ForecastSample};
pub use geocode::{GeoPlace, GeocodeClient, GeocodeError};
#[allow(unused_imports)]
pub use uv::{UvClass, UvClient, UvError, UvReport};

use chrono::{DateTime, FixedOffset};

/// Weather condition derived from an API icon code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
}

impl Condition {
    /// Terminal glyph standing in for the condition icon
    pub fn glyph(&self) -> &'static str {
        match self {
            Condition::Clear => "\u{2600}",        // ☀
            Condition::Clouds => "\u{2601}",       // ☁
            Condition::Rain => "\u{1F327}",        // 🌧
            Condition::Drizzle => "\u{1F326}",     // 🌦
            Condition::Thunderstorm => "\u{26C8}", // ⛈
            Condition::Snow => "\u{2744}",         // ❄
            Condition::Mist => "\u{1F32B}",        // 🌫
        }
    }
}

/// Maps an OpenWeatherMap icon code (e.g. "10d", "01n") to a condition
///
/// Only the numeric prefix matters; the day/night suffix is ignored.
/// Unknown codes fall back to Clouds.
pub fn icon_to_condition(icon: &str) -> Condition {
    match icon.get(..2) {
        Some("01") => Condition::Clear,
        Some("02") | Some("03") | Some("04") => Condition::Clouds,
        Some("09") => Condition::Drizzle,
        Some("10") => Condition::Rain,
        Some("11") => Condition::Thunderstorm,
        Some("13") => Condition::Snow,
        Some("50") => Condition::Mist,
        _ => Condition::Clouds,
    }
}

/// Maps wind degrees to one of eight compass sectors
///
/// Degrees outside [0, 360] render as the "--" placeholder.
pub fn wind_direction(deg: f64) -> &'static str {
    if (0.0..=22.5).contains(&deg) || (deg > 337.5 && deg <= 360.0) {
        "North"
    } else if deg > 22.5 && deg <= 67.5 {
        "Northeast"
    } else if deg > 67.5 && deg <= 112.5 {
        "East"
    } else if deg > 112.5 && deg <= 157.5 {
        "Southeast"
    } else if deg > 157.5 && deg <= 202.5 {
        "South"
    } else if deg > 202.5 && deg <= 247.5 {
        "Southwest"
    } else if deg > 247.5 && deg <= 292.5 {
        "West"
    } else if deg > 292.5 && deg <= 337.5 {
        "Northwest"
    } else {
        "--"
    }
}

/// Formats a unix timestamp as "HH:MM" in the given UTC offset
///
/// Zero and unrepresentable timestamps render as the "--:--" placeholder.
pub fn format_unix_time(timestamp: i64, offset_secs: i32) -> String {
    if timestamp <= 0 {
        return "--:--".to_string();
    }

    let Some(offset) = FixedOffset::east_opt(offset_secs).or_else(|| FixedOffset::east_opt(0))
    else {
        return "--:--".to_string();
    };

    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.with_timezone(&offset).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
