//! HAFAS REST HTTP client.
//!
//! Provides async methods for querying a `hafas-rest-api` instance and
//! implements [`TransitProvider`] on top of them.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::HafasSettings;
use crate::domain::{DepartureQuery, RawDeparture, StationId};
use crate::provider::TransitProvider;

use super::convert::convert_departures;
use super::error::HafasError;
use super::types::{DeparturesResponse, StopDto};

/// Default base URL (the public VBB instance).
pub const DEFAULT_BASE_URL: &str = "https://v6.vbb.transport.rest";

/// Default user agent. Public instances ask clients to identify themselves.
const DEFAULT_USER_AGENT: &str = concat!("departure-fetcher/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HAFAS client.
#[derive(Debug, Clone)]
pub struct HafasConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl HafasConfig {
    /// Create a config pointing at the default instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for HafasConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&HafasSettings> for HafasConfig {
    fn from(settings: &HafasSettings) -> Self {
        Self::new()
            .with_base_url(settings.base_url.clone())
            .with_timeout(settings.timeout_secs)
    }
}

/// HAFAS REST API client.
#[derive(Debug, Clone)]
pub struct HafasClient {
    http: reqwest::Client,
    base_url: String,
}

impl HafasClient {
    /// Create a new client with the given configuration.
    pub fn new(config: HafasConfig) -> Result<Self, HafasError> {
        let mut headers = HeaderMap::new();

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| HafasError::ApiError {
                status: 0,
                message: "Invalid user agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a stop by id.
    pub async fn get_stop(&self, station: &StationId) -> Result<StopDto, HafasError> {
        let url = format!("{}/stops/{}", self.base_url, station.as_str());
        self.get_json(&url, &[], station).await
    }

    /// Get departures at a stop.
    ///
    /// Records that cannot be converted are logged and skipped.
    pub async fn get_departures(
        &self,
        station: &StationId,
        query: &DepartureQuery,
    ) -> Result<Vec<RawDeparture>, HafasError> {
        let url = format!("{}/stops/{}/departures", self.base_url, station.as_str());

        let response: DeparturesResponse = self
            .get_json(&url, &query_params(query), station)
            .await?;

        Ok(convert_departures(&response.into_departures()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        station: &StationId,
    ) -> Result<T, HafasError> {
        debug!(url, ?params, "HAFAS request");

        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(HafasError::StationNotFound(station.clone()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(HafasError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HafasError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| HafasError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Query-string parameters for a departure query.
fn query_params(query: &DepartureQuery) -> Vec<(&'static str, String)> {
    match query {
        DepartureQuery::Window {
            when,
            duration_mins,
        } => vec![
            ("when", when.to_rfc3339()),
            ("duration", duration_mins.to_string()),
        ],
        DepartureQuery::Direction {
            next_station,
            when,
            results,
        } => vec![
            ("direction", next_station.to_string()),
            ("when", when.to_rfc3339()),
            ("results", results.to_string()),
        ],
    }
}

impl TransitProvider for HafasClient {
    type Error = HafasError;

    async fn station_name(&self, station: &StationId) -> Result<String, HafasError> {
        Ok(self.get_stop(station).await?.name)
    }

    async fn departures(
        &self,
        station: &StationId,
        query: &DepartureQuery,
    ) -> Result<Vec<RawDeparture>, HafasError> {
        self.get_departures(station, query).await
    }
}
