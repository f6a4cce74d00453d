//! Application state management for Skycast
//!
//! Holds the main application state, handles keyboard input, and turns raw
//! API responses into the read-only snapshot the dashboard renders.

use chrono::{DateTime, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;

use crate::aggregate::group_by_day;
use crate::cli::StartupConfig;
use crate::data::{
    format_unix_time, icon_to_condition, wind_direction, Condition, ForecastClient,
    ForecastResponse, GeoPlace, GeocodeClient, UvClient, UvReport,
};
use crate::hourly::{interpolate_day, HourlyEvent, HourlySample, HourlySlot};
use crate::location::{LocationStore, StoredLocation};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while fetching data
    Loading,
    /// The weather dashboard for the pinned location
    Dashboard,
    /// City search view
    Search,
}

/// State of the city search view
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Current contents of the input field
    pub input: String,
    /// Candidates returned for the submitted query
    pub results: Vec<GeoPlace>,
    /// Index of the highlighted candidate
    pub selected: usize,
}

impl SearchState {
    fn reset(&mut self) {
        self.input.clear();
        self.results.clear();
        self.selected = 0;
    }
}

/// Values backing the current-conditions card
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSummary {
    /// First day's average temperature, rounded
    pub avg_temp: i32,
    /// First day's maximum, rounded
    pub max_temp: i32,
    /// First day's minimum, rounded
    pub min_temp: i32,
    /// Condition description from the first sample (e.g. "light rain")
    pub description: String,
    /// Condition of the first sample
    pub condition: Condition,
}

/// One row of the weekly outlook
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutlook {
    /// Calendar date of the bucket
    pub date: NaiveDate,
    /// Lowest sampled temperature of the day
    pub min_temp: f64,
    /// Highest sampled temperature of the day
    pub max_temp: f64,
    /// Condition of the day's first sample
    pub condition: Condition,
}

/// Values backing the auxiliary index cards
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSummary {
    /// UV index report, when the UV fetch succeeded
    pub uv: Option<UvReport>,
    /// Sunrise time ("HH:MM", local to the city)
    pub sunrise: String,
    /// Sunset time ("HH:MM", local to the city)
    pub sunset: String,
    /// Wind speed in km/h (converted from the API's m/s)
    pub wind_kmh: f64,
    /// Compass direction of the wind
    pub wind_dir: &'static str,
    /// Probability of precipitation for the next sample window, 0.0-1.0
    pub precipitation: f64,
    /// Feels-like temperature in °C
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: u8,
}

/// Read-only data for one render cycle of the dashboard
///
/// Built fresh from each forecast response and discarded when the next
/// refresh overwrites it; the UI never mutates it.
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    /// City name as resolved by the forecast API
    pub city: String,
    /// Current-conditions card values; None when the response had no samples
    pub current: Option<CurrentSummary>,
    /// Synthesized hourly series for the first day
    pub hourly: Vec<HourlySlot>,
    /// One entry per forecast day, in chronological order
    pub weekly: Vec<DayOutlook>,
    /// Index card values; None when the response had no samples
    pub indices: Option<IndexSummary>,
    /// When this snapshot was built
    pub fetched_at: DateTime<Local>,
}

impl WeatherSnapshot {
    /// Builds a snapshot from a raw forecast response and optional UV report
    ///
    /// The random source drives the hourly wrap-around extrapolation;
    /// interpolator events are forwarded to `on_event`.
    pub fn build<R: Rng>(
        response: &ForecastResponse,
        uv: Option<UvReport>,
        rng: &mut R,
        mut on_event: impl FnMut(HourlyEvent),
    ) -> Self {
        let grouped = group_by_day(&response.list);

        let current = grouped.first().map(|day| {
            let lead = day.forecasts.first().and_then(|f| f.data.weather.first());
            CurrentSummary {
                avg_temp: day.averages.avg_temp.round() as i32,
                max_temp: day.averages.max_temp.round() as i32,
                min_temp: day.averages.min_temp.round() as i32,
                description: lead
                    .map(|w| w.description.clone())
                    .unwrap_or_else(|| "--".to_string()),
                condition: lead
                    .map(|w| icon_to_condition(&w.icon))
                    .unwrap_or(Condition::Clouds),
            }
        });

        let hourly = grouped
            .first()
            .map(|day| {
                let samples: Vec<HourlySample> = day
                    .forecasts
                    .iter()
                    .map(|f| HourlySample {
                        time: f.time.clone(),
                        temperature: f.data.main.temp,
                        icon: f
                            .data
                            .weather
                            .first()
                            .map(|w| w.icon.clone())
                            .unwrap_or_default(),
                    })
                    .collect();
                interpolate_day(&samples, rng, &mut on_event)
            })
            .unwrap_or_default();

        let weekly = grouped
            .iter()
            .filter_map(|day| {
                let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d").ok()?;
                let condition = day
                    .forecasts
                    .first()
                    .and_then(|f| f.data.weather.first())
                    .map(|w| icon_to_condition(&w.icon))
                    .unwrap_or(Condition::Clouds);
                Some(DayOutlook {
                    date,
                    min_temp: day.averages.min_temp,
                    max_temp: day.averages.max_temp,
                    condition,
                })
            })
            .collect();

        let indices = response.list.first().map(|first| IndexSummary {
            uv,
            sunrise: format_unix_time(response.city.sunrise, response.city.timezone),
            sunset: format_unix_time(response.city.sunset, response.city.timezone),
            wind_kmh: first.wind.speed * 3.6,
            wind_dir: wind_direction(first.wind.deg),
            precipitation: first.pop,
            feels_like: first.main.feels_like,
            humidity: first.main.humidity,
        });

        WeatherSnapshot {
            city: response.city.name.clone(),
            current,
            hourly,
            weekly,
            indices,
            fetched_at: Local::now(),
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Snapshot currently on display, if a fetch has succeeded
    pub snapshot: Option<WeatherSnapshot>,
    /// State of the search view
    pub search: SearchState,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Latest warning or error to surface in the status line
    pub status: Option<String>,
    /// Timestamp of last successful data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag indicating a forecast refresh has been requested
    pub refresh_requested: bool,
    /// Flag indicating a geocode query has been submitted
    pub search_requested: bool,
    /// Location the dashboard is pinned to
    location: Option<StoredLocation>,
    /// Persistent location store, when a config directory is available
    store: Option<LocationStore>,
    /// City query given on the command line, consumed on startup
    initial_query: Option<String>,
    /// Geocoding API client
    geocode_client: GeocodeClient,
    /// Forecast API client
    forecast_client: ForecastClient,
    /// UV index API client
    uv_client: UvClient,
}

impl App {
    /// Creates a new App instance from startup configuration
    pub fn new(config: StartupConfig) -> Self {
        let store = LocationStore::new();
        Self::with_parts(config, store)
    }

    /// Creates a new App instance with a custom location store (for testing)
    #[cfg(test)]
    pub fn with_store(config: StartupConfig, store: LocationStore) -> Self {
        Self::with_parts(config, Some(store))
    }

    fn with_parts(config: StartupConfig, store: Option<LocationStore>) -> Self {
        Self {
            state: AppState::Loading,
            snapshot: None,
            search: SearchState::default(),
            should_quit: false,
            show_help: false,
            status: None,
            last_refresh: None,
            refresh_requested: false,
            search_requested: false,
            location: None,
            store,
            initial_query: config.initial_query,
            geocode_client: GeocodeClient::new(config.api_key.clone()),
            forecast_client: ForecastClient::new(config.api_key.clone()),
            uv_client: UvClient::new(config.api_key),
        }
    }

    /// Resolves the startup location and performs the initial fetch
    ///
    /// A city given on the command line is geocoded and its best match
    /// pinned; otherwise the stored location is used. With neither, the app
    /// opens in the search view.
    pub async fn initialize(&mut self) {
        if let Some(query) = self.initial_query.take() {
            match self.geocode_client.search(&query).await {
                Ok(results) => match results.into_iter().next() {
                    Some(place) => self.pin_location(&place),
                    None => {
                        self.status = Some(format!("No locations found for '{}'", query));
                    }
                },
                Err(e) => {
                    self.status = Some(format!("Location search failed: {}", e));
                }
            }
        }

        if self.location.is_none() {
            self.location = self.store.as_ref().and_then(|s| s.load());
        }

        if self.location.is_some() {
            self.load_weather().await;
        } else {
            self.state = AppState::Search;
        }
    }

    /// Fetches forecast and UV data for the pinned location and rebuilds the
    /// snapshot
    ///
    /// Both requests run concurrently. A failed UV fetch degrades to a
    /// placeholder card; a failed forecast fetch keeps the previous snapshot
    /// on display.
    pub async fn load_weather(&mut self) {
        let Some(location) = self.location.clone() else {
            self.state = AppState::Search;
            return;
        };

        self.status = None;

        let (forecast, uv) = futures::join!(
            self.forecast_client
                .fetch_forecast(location.latitude, location.longitude),
            self.uv_client.fetch_uv(location.latitude, location.longitude),
        );

        let uv = match uv {
            Ok(report) => Some(report),
            Err(e) => {
                self.status = Some(format!("UV index unavailable: {}", e));
                None
            }
        };

        match forecast {
            Ok(response) => {
                let mut dropped = 0usize;
                let mut rng = rand::thread_rng();
                let mut snapshot = WeatherSnapshot::build(&response, uv, &mut rng, |event| {
                    if matches!(event, HourlyEvent::DiscardedSample { .. }) {
                        dropped += 1;
                    }
                });

                if snapshot.city.is_empty() {
                    if let Some(name) = &location.name {
                        snapshot.city = name.clone();
                    }
                }
                if dropped > 0 {
                    self.status = Some(format!("Dropped {} malformed hourly samples", dropped));
                }

                self.last_refresh = Some(snapshot.fetched_at);
                self.snapshot = Some(snapshot);
                self.state = AppState::Dashboard;
            }
            Err(e) => {
                self.status = Some(format!("Forecast fetch failed: {}", e));
                self.state = if self.snapshot.is_some() {
                    AppState::Dashboard
                } else {
                    AppState::Search
                };
            }
        }
    }

    /// Runs the submitted search query against the geocoding API
    pub async fn run_search(&mut self) {
        let query = self.search.input.trim().to_string();
        if query.is_empty() {
            return;
        }

        match self.geocode_client.search(&query).await {
            Ok(results) => {
                if results.is_empty() {
                    self.status = Some(format!("No locations found for '{}'", query));
                }
                self.search.selected = 0;
                self.search.results = results;
            }
            Err(e) => {
                self.status = Some(format!("Location search failed: {}", e));
                self.search.results.clear();
            }
        }
    }

    /// Pins a place as the active location and persists it
    fn pin_location(&mut self, place: &GeoPlace) {
        let location = StoredLocation {
            latitude: place.lat,
            longitude: place.lon,
            name: Some(place.name.clone()),
        };

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&location) {
                self.status = Some(format!("Could not save location: {}", e));
            }
        }

        self.location = Some(location);
        self.state = AppState::Loading;
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` or `Esc` (in Dashboard): Quit the application
    /// - `r`: Refresh data now
    /// - `/` or `s`: Open city search
    /// - `?`: Toggle help overlay
    /// - In Search: type to edit, `Enter` submits the query or picks the
    ///   highlighted candidate, `↑`/`↓` move the highlight, `Esc` goes back
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::Dashboard => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('/') | KeyCode::Char('s') => {
                    self.search.reset();
                    self.state = AppState::Search;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Search => match key_event.code {
                KeyCode::Esc => {
                    if self.snapshot.is_some() {
                        self.state = AppState::Dashboard;
                    } else {
                        self.should_quit = true;
                    }
                }
                KeyCode::Enter => {
                    if self.search.results.is_empty() {
                        self.search_requested = true;
                    } else if let Some(place) =
                        self.search.results.get(self.search.selected).cloned()
                    {
                        self.pin_location(&place);
                        self.search.reset();
                        self.refresh_requested = true;
                    }
                }
                KeyCode::Up => {
                    self.move_result_up();
                }
                KeyCode::Down => {
                    self.move_result_down();
                }
                KeyCode::Backspace => {
                    self.search.input.pop();
                    // Edits invalidate the previous candidates
                    self.search.results.clear();
                    self.search.selected = 0;
                }
                KeyCode::Char(c) => {
                    self.search.input.push(c);
                    self.search.results.clear();
                    self.search.selected = 0;
                }
                _ => {}
            },
        }
    }

    /// Moves the candidate highlight up, wrapping to the bottom at the top
    fn move_result_up(&mut self) {
        let count = self.search.results.len();
        if count == 0 {
            return;
        }
        if self.search.selected == 0 {
            self.search.selected = count - 1;
        } else {
            self.search.selected -= 1;
        }
    }

    /// Moves the candidate highlight down, wrapping to the top at the bottom
    fn move_result_down(&mut self) {
        let count = self.search.results.len();
        if count == 0 {
            return;
        }
        self.search.selected = (self.search.selected + 1) % count;
    }
}
