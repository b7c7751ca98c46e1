//! Departure fetching, filtering and ordering for one station.
//!
//! The fetcher computes a query from its configuration, hands it to a
//! [`TransitProvider`], and shapes the raw records into a
//! [`DepartureList`]: excluded stations, vehicle types and lines are
//! dropped, missing delays are normalized to zero, and the result is sorted
//! by effective time.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::FetcherConfig;
use crate::domain::{Departure, DepartureList, DepartureQuery, RawDeparture, StationId};
use crate::provider::TransitProvider;

/// How far before the delay-adjusted horizon a query starts, so departures
/// the rider only just misses are still returned.
pub const LOOKBACK_MINUTES: i64 = 5;

/// Fetches departures for a single configured station.
#[derive(Debug, Clone)]
pub struct DepartureFetcher<P> {
    config: FetcherConfig,
    provider: P,
}

impl<P: TransitProvider> DepartureFetcher<P> {
    /// Create a fetcher for the configured station.
    pub fn new(config: FetcherConfig, provider: P) -> Self {
        Self { config, provider }
    }

    /// The configuration this fetcher was built with.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// The configured station id.
    pub fn station_id(&self) -> &StationId {
        &self.config.station_id
    }

    /// Resolve the configured station's name via the provider.
    pub async fn station_name(&self) -> Result<String, P::Error> {
        self.provider.station_name(&self.config.station_id).await
    }

    /// Fetch, filter and sort departures starting from the current time.
    pub async fn fetch_departures(&self) -> Result<DepartureList, P::Error> {
        self.fetch_departures_at(Utc::now()).await
    }

    /// Fetch, filter and sort departures as if the current time were `now`.
    pub async fn fetch_departures_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<DepartureList, P::Error> {
        let query = self.query(now);
        debug!(station = %self.config.station_id, ?query, "fetching departures");

        let raw = self
            .provider
            .departures(&self.config.station_id, &query)
            .await?;

        Ok(self.process_data(raw))
    }

    /// Reference time for a query issued at `now`.
    ///
    /// With a positive delay tolerance the query starts
    /// [`LOOKBACK_MINUTES`] before `now + delay`; otherwise at `now`.
    /// The tolerance is capped as in [`FetcherConfig::delay_tolerance`].
    pub fn reference_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        if self.config.delay > 0 {
            now + self.config.delay_tolerance() - Duration::minutes(LOOKBACK_MINUTES)
        } else {
            now
        }
    }

    /// Build the provider query for a request issued at `now`.
    pub fn query(&self, now: DateTime<Utc>) -> DepartureQuery {
        let when = self.reference_time(now);

        match &self.config.direction_station_id {
            None => DepartureQuery::Window {
                when,
                duration_mins: self.config.departure_minutes,
            },
            Some(next_station) => DepartureQuery::Direction {
                next_station: next_station.clone(),
                when,
                results: self.config.max_departures(),
            },
        }
    }

    /// Filter, normalize and sort raw provider records.
    pub fn process_data(&self, raw: Vec<RawDeparture>) -> DepartureList {
        let total = raw.len();

        let mut departures: Vec<Departure> = raw
            .into_iter()
            .filter(|row| !self.is_excluded(row))
            .map(Departure::from_raw)
            .collect();

        // Stable: equal effective times keep provider order.
        departures.sort_by_key(Departure::effective_time_millis);

        debug!(
            station = %self.config.station_id,
            kept = departures.len(),
            dropped = total - departures.len(),
            "processed departures"
        );

        DepartureList {
            station_id: self.config.station_id.clone(),
            departures,
        }
    }

    fn is_excluded(&self, row: &RawDeparture) -> bool {
        self.config.ignored_stations.contains(&row.station_id)
            || self
                .config
                .excluded_transportation_types
                .contains(&row.product)
            || self.config.ignored_lines.contains(&row.line_name)
    }
}
