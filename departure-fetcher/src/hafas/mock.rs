//! Mock HAFAS client for running without API access.
//!
//! Loads canned stop data from JSON files and serves it as if it were a
//! live API response.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{DepartureQuery, RawDeparture, StationId};
use crate::provider::TransitProvider;

use super::convert::convert_departures;
use super::error::HafasError;
use super::types::DepartureDto;

/// Contents of one mock file.
#[derive(Debug, Clone, Deserialize)]
struct MockStation {
    name: String,
    departures: Vec<DepartureDto>,
}

/// Mock HAFAS client that serves data from JSON files.
///
/// Useful for development and for demoing boards offline.
#[derive(Debug, Clone)]
pub struct MockHafasClient {
    /// Pre-loaded stops, keyed by id.
    stations: Arc<HashMap<StationId, MockStation>>,
}

impl MockHafasClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{stop id}.json` (e.g. `900000100003.json`),
    /// each holding `{"name": ..., "departures": [...]}`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, HafasError> {
        let data_dir = data_dir.as_ref();
        let mut stations = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| HafasError::ApiError {
            status: 0,
            message: format!("Failed to read mock data directory: {}", e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| HafasError::ApiError {
                status: 0,
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let id_str =
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| HafasError::ApiError {
                        status: 0,
                        message: format!("Invalid filename: {:?}", path),
                    })?;

            let id = StationId::parse(id_str).map_err(|_| HafasError::ApiError {
                status: 0,
                message: format!("Invalid stop id in filename: {}", id_str),
            })?;

            let json = std::fs::read_to_string(&path).map_err(|e| HafasError::ApiError {
                status: 0,
                message: format!("Failed to read {:?}: {}", path, e),
            })?;

            let station: MockStation =
                serde_json::from_str(&json).map_err(|e| HafasError::Json {
                    message: format!("Failed to parse {:?}: {}", path, e),
                    body: None,
                })?;

            stations.insert(id, station);
        }

        if stations.is_empty() {
            return Err(HafasError::ApiError {
                status: 0,
                message: format!("No mock stop files found in {:?}", data_dir),
            });
        }

        Ok(Self {
            stations: Arc::new(stations),
        })
    }

    /// List available stops in the mock data.
    pub fn available_stations(&self) -> Vec<StationId> {
        self.stations.keys().cloned().collect()
    }

    fn station(&self, id: &StationId) -> Result<&MockStation, HafasError> {
        self.stations.get(id).ok_or_else(|| {
            debug!(
                station = %id,
                available = ?self.stations.keys().map(StationId::as_str).collect::<Vec<_>>(),
                "no mock data for stop"
            );
            HafasError::StationNotFound(id.clone())
        })
    }
}

impl TransitProvider for MockHafasClient {
    type Error = HafasError;

    async fn station_name(&self, station: &StationId) -> Result<String, HafasError> {
        Ok(self.station(station)?.name.clone())
    }

    /// Query parameters are ignored - mock data is static.
    async fn departures(
        &self,
        station: &StationId,
        _query: &DepartureQuery,
    ) -> Result<Vec<RawDeparture>, HafasError> {
        Ok(convert_departures(&self.station(station)?.departures))
    }
}
