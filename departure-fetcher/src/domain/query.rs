//! Departure query shapes.

use chrono::{DateTime, Utc};

use super::StationId;

/// Options for a provider departure request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureQuery {
    /// All departures within `duration_mins` minutes after `when`.
    Window {
        when: DateTime<Utc>,
        duration_mins: u32,
    },

    /// The next `results` departures after `when` heading towards
    /// `next_station`.
    Direction {
        next_station: StationId,
        when: DateTime<Utc>,
        results: u32,
    },
}

impl DepartureQuery {
    /// The reference time of the query.
    pub fn when(&self) -> DateTime<Utc> {
        match self {
            DepartureQuery::Window { when, .. } | DepartureQuery::Direction { when, .. } => *when,
        }
    }
}
