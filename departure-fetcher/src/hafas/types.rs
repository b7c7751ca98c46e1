//! HAFAS REST API response DTOs.
//!
//! These types map directly to the `hafas-rest-api` JSON responses. They
//! use `Option` liberally because the API sends `null` for missing realtime
//! data and older versions omit fields entirely.

use serde::Deserialize;

/// Response from `GET /stops/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    /// Stop id.
    pub id: String,

    /// Human-readable stop name.
    pub name: String,
}

/// Response from `GET /stops/{id}/departures`.
///
/// API v6 wraps the list in an object; earlier versions return a bare
/// array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeparturesResponse {
    Wrapped { departures: Vec<DepartureDto> },
    Bare(Vec<DepartureDto>),
}

impl DeparturesResponse {
    /// The departures regardless of envelope.
    pub fn into_departures(self) -> Vec<DepartureDto> {
        match self {
            DeparturesResponse::Wrapped { departures } => departures,
            DeparturesResponse::Bare(departures) => departures,
        }
    }
}

/// A single departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    /// Trip id, stable for the lifetime of the trip.
    pub trip_id: Option<String>,

    /// Stop the departure is reported at. Older APIs call this `station`.
    #[serde(alias = "station")]
    pub stop: Option<StopRefDto>,

    /// Realtime departure time (schedule + delay), `null` if cancelled.
    pub when: Option<String>,

    /// Scheduled departure time.
    pub planned_when: Option<String>,

    /// Delay in seconds.
    pub delay: Option<i64>,

    /// Direction text, usually the terminus.
    pub direction: Option<String>,

    /// Line information.
    pub line: Option<LineDto>,

    /// Whether the departure is cancelled.
    pub cancelled: Option<bool>,
}

/// Stop reference inside a departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRefDto {
    pub id: Option<String>,
}

/// Line information inside a departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    /// Line name (e.g. "U2").
    pub name: Option<String>,

    /// Trip number. A string in current APIs; older ones sent a number
    /// named `nr`.
    #[serde(alias = "nr")]
    pub fahrt_nr: Option<serde_json::Value>,

    /// Product (vehicle type) code (e.g. "subway", "bus").
    pub product: Option<String>,
}
