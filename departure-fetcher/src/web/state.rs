//! Application state for the web layer.

use std::sync::Arc;

use crate::domain::StationId;
use crate::fetcher::DepartureFetcher;

/// Shared application state.
///
/// Holds one fetcher per configured station.
pub struct AppState<P> {
    fetchers: Arc<Vec<DepartureFetcher<P>>>,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(fetchers: Vec<DepartureFetcher<P>>) -> Self {
        Self {
            fetchers: Arc::new(fetchers),
        }
    }

    /// All fetchers, in configuration order.
    pub fn fetchers(&self) -> &[DepartureFetcher<P>] {
        &self.fetchers
    }
}

impl<P: crate::provider::TransitProvider> AppState<P> {
    /// Find the fetcher for a station.
    pub fn fetcher(&self, station: &StationId) -> Option<&DepartureFetcher<P>> {
        self.fetchers.iter().find(|f| f.station_id() == station)
    }
}

// Derived Clone would require `P: Clone`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            fetchers: Arc::clone(&self.fetchers),
        }
    }
}
