//! Command-line interface parsing for Skycast
//!
//! Handles the optional positional city query and API key resolution
//! (flag first, then the OPENWEATHER_API_KEY environment variable).

use clap::Parser;
use thiserror::Error;

/// Environment variable consulted when --api-key is not given
const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key was provided on the command line or in the environment
    #[error("Missing API key: pass --api-key or set the OPENWEATHER_API_KEY environment variable")]
    MissingApiKey,
}

/// Skycast - terminal weather dashboard
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "City weather dashboard: current conditions, hourly trend, weekly outlook")]
#[command(version)]
pub struct Cli {
    /// City to look up on startup (multiple words are joined)
    ///
    /// Examples:
    ///   skycast                  # Use the stored location, or open search
    ///   skycast Lisbon           # Geocode Lisbon and pin it
    ///   skycast Rio de Janeiro   # Multi-word queries need no quotes
    #[arg(value_name = "CITY")]
    pub city: Vec<String>,

    /// OpenWeatherMap API key (falls back to OPENWEATHER_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// City query to geocode on startup, if one was given
    pub initial_query: Option<String>,
    /// Resolved API key
    pub api_key: String,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the query and resolved API key
    /// * `Err(CliError::MissingApiKey)` if no key is available
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Self::from_cli_with_env(cli, std::env::var(API_KEY_ENV).ok())
    }

    /// Variant taking the environment lookup as an argument, for tests
    fn from_cli_with_env(cli: &Cli, env_key: Option<String>) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .clone()
            .or(env_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingApiKey)?;

        let initial_query = if cli.city.is_empty() {
            None
        } else {
            Some(cli.city.join(" "))
        };

        Ok(StartupConfig {
            initial_query,
            api_key,
        })
    }
}
