//! Data transfer objects for web responses.

use serde::Serialize;

use super::board::BoardEntry;

/// A configured station.
#[derive(Debug, Serialize)]
pub struct StationSummary {
    /// Station id
    pub station_id: String,

    /// Resolved name, if the lookup succeeded
    pub name: Option<String>,

    /// Direction filter, if configured
    pub direction_station_id: Option<String>,
}

/// Response listing configured stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationSummary>,
}

/// A departure on a board.
#[derive(Debug, Serialize)]
pub struct BoardDeparture {
    /// Scheduled time (RFC 3339)
    pub when: String,

    /// Scheduled time plus delay (RFC 3339)
    pub effective_time: String,

    /// Delay in seconds
    pub delay: i64,

    /// Line name
    pub line_name: String,

    /// Line or trip number
    pub line_number: Option<String>,

    /// Vehicle type code
    pub product: String,

    /// Direction text
    pub direction: String,

    /// Whether the trip is cancelled
    pub cancelled: bool,

    /// Whether the rider can still catch it
    pub reachable: bool,
}

impl From<&BoardEntry> for BoardDeparture {
    fn from(entry: &BoardEntry) -> Self {
        let d = &entry.departure;
        Self {
            when: d.when.to_rfc3339(),
            effective_time: d.effective_time().to_rfc3339(),
            delay: d.delay,
            line_name: d.line_name.clone(),
            line_number: d.line_number.clone(),
            product: d.product.clone(),
            direction: d.direction.clone(),
            cancelled: d.cancelled,
            reachable: entry.reachable,
        }
    }
}

/// Departure board for one station.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub station_id: String,
    pub station_name: Option<String>,
    /// When the board was computed (RFC 3339)
    pub generated_at: String,
    pub departures: Vec<BoardDeparture>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::Departure;

    #[test]
    fn board_departure_serializes() {
        let entry = BoardEntry {
            departure: Departure {
                when: DateTime::parse_from_rfc3339("2026-10-19T10:02:00+02:00").unwrap(),
                delay: 120,
                line_name: "U2".into(),
                line_number: Some("16712".into()),
                product: "subway".into(),
                direction: "S+U Pankow".into(),
                cancelled: false,
            },
            reachable: true,
        };

        let json = serde_json::to_value(BoardDeparture::from(&entry)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "when": "2026-10-19T10:02:00+02:00",
                "effective_time": "2026-10-19T10:04:00+02:00",
                "delay": 120,
                "line_name": "U2",
                "line_number": "16712",
                "product": "subway",
                "direction": "S+U Pankow",
                "cancelled": false,
                "reachable": true
            })
        );
    }
}
