//! Configuration for fetchers and the board server.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

use chrono::Duration;
use serde::Deserialize;

use crate::domain::StationId;

/// Largest accepted delay tolerance, in minutes, in either direction.
pub const MAX_DELAY_MINUTES: i64 = 24 * 60;

/// Configuration for a single station's departure fetcher.
///
/// Field names follow the camelCase keys used in config files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetcherConfig {
    /// Station to fetch departures for.
    pub station_id: StationId,

    /// Only show departures heading towards this station.
    #[serde(default)]
    pub direction_station_id: Option<StationId>,

    /// Minutes the rider needs to reach the station.
    #[serde(default = "FetcherConfig::default_delay")]
    pub delay: i64,

    /// Length of the departure window in minutes.
    #[serde(default = "FetcherConfig::default_departure_minutes")]
    pub departure_minutes: u32,

    /// Departures the rider can no longer catch that are still shown.
    #[serde(default = "FetcherConfig::default_max_unreachable_departures")]
    pub max_unreachable_departures: u32,

    /// Departures the rider can still catch that are shown.
    #[serde(default = "FetcherConfig::default_max_reachable_departures")]
    pub max_reachable_departures: u32,

    /// Stop ids whose departures are dropped (e.g. one platform of a
    /// meta station).
    #[serde(default)]
    pub ignored_stations: HashSet<StationId>,

    /// Vehicle type codes that are dropped (e.g. "bus").
    #[serde(default)]
    pub excluded_transportation_types: HashSet<String>,

    /// Line names that are dropped.
    #[serde(default)]
    pub ignored_lines: HashSet<String>,
}

impl FetcherConfig {
    fn default_delay() -> i64 {
        10
    }
    fn default_departure_minutes() -> u32 {
        10
    }
    fn default_max_unreachable_departures() -> u32 {
        0
    }
    fn default_max_reachable_departures() -> u32 {
        7
    }

    /// Create a config for a station with default settings.
    pub fn new(station_id: StationId) -> Self {
        Self {
            station_id,
            direction_station_id: None,
            delay: Self::default_delay(),
            departure_minutes: Self::default_departure_minutes(),
            max_unreachable_departures: Self::default_max_unreachable_departures(),
            max_reachable_departures: Self::default_max_reachable_departures(),
            ignored_stations: HashSet::new(),
            excluded_transportation_types: HashSet::new(),
            ignored_lines: HashSet::new(),
        }
    }

    /// Restrict departures to those heading towards `station`.
    pub fn with_direction(mut self, station: StationId) -> Self {
        self.direction_station_id = Some(station);
        self
    }

    /// Set the delay tolerance in minutes.
    pub fn with_delay(mut self, minutes: i64) -> Self {
        self.delay = minutes;
        self
    }

    /// Set the departure window in minutes.
    pub fn with_departure_minutes(mut self, minutes: u32) -> Self {
        self.departure_minutes = minutes;
        self
    }

    /// Set how many unreachable and reachable departures to show.
    pub fn with_max_departures(mut self, unreachable: u32, reachable: u32) -> Self {
        self.max_unreachable_departures = unreachable;
        self.max_reachable_departures = reachable;
        self
    }

    /// Drop departures reported for `station`.
    pub fn ignore_station(mut self, station: StationId) -> Self {
        self.ignored_stations.insert(station);
        self
    }

    /// Drop departures of the given vehicle type.
    pub fn exclude_type(mut self, product: impl Into<String>) -> Self {
        self.excluded_transportation_types.insert(product.into());
        self
    }

    /// Drop departures of the given line.
    pub fn ignore_line(mut self, line: impl Into<String>) -> Self {
        self.ignored_lines.insert(line.into());
        self
    }

    /// The delay tolerance as a duration.
    ///
    /// Negative tolerances count as zero and large ones are capped at
    /// [`MAX_DELAY_MINUTES`].
    pub fn delay_tolerance(&self) -> Duration {
        Duration::minutes(self.delay.clamp(0, MAX_DELAY_MINUTES))
    }

    /// Total number of departures requested in a direction-bounded query.
    pub fn max_departures(&self) -> u32 {
        self.max_unreachable_departures
            .saturating_add(self.max_reachable_departures)
    }
}

/// Settings for the HAFAS REST provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HafasSettings {
    /// Base URL of a hafas-rest-api instance.
    #[serde(default = "HafasSettings::default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "HafasSettings::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HafasSettings {
    fn default_base_url() -> String {
        crate::hafas::DEFAULT_BASE_URL.to_string()
    }
    fn default_timeout_secs() -> u64 {
        30
    }
}

impl Default for HafasSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// Top-level configuration file for the board server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Address to listen on.
    #[serde(default = "AppConfig::default_listen")]
    pub listen: SocketAddr,

    /// Provider settings.
    #[serde(default)]
    pub hafas: HafasSettings,

    /// One entry per station board.
    pub stations: Vec<FetcherConfig>,
}

impl AppConfig {
    fn default_listen() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 3000))
    }

    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Read(e.to_string()))?;

        Self::from_json(&content)
    }

    /// Parse and validate config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stations.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one station must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for station in &self.stations {
            if !seen.insert(&station.station_id) {
                return Err(ConfigError::Invalid(format!(
                    "station {} is configured more than once",
                    station.station_id
                )));
            }
            if station.delay.unsigned_abs() > MAX_DELAY_MINUTES.unsigned_abs() {
                return Err(ConfigError::Invalid(format!(
                    "station {}: delay {} is outside ±{MAX_DELAY_MINUTES} minutes",
                    station.station_id, station.delay
                )));
            }
        }

        Ok(())
    }
}

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}
