//! The seam between the fetcher and a transit-data backend.

use std::future::Future;

use crate::domain::{DepartureQuery, RawDeparture, StationId};

/// A source of station names and raw departures.
///
/// This abstraction allows the fetcher to be tested with mock data and to
/// run against either the live HAFAS API or canned files.
pub trait TransitProvider: Send + Sync {
    /// Error returned by provider calls. The fetcher passes it through
    /// unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a station's display name.
    fn station_name(
        &self,
        station: &StationId,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Fetch raw departures for a station.
    fn departures(
        &self,
        station: &StationId,
        query: &DepartureQuery,
    ) -> impl Future<Output = Result<Vec<RawDeparture>, Self::Error>> + Send;
}
