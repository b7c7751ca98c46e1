//! Departure records before and after normalization.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use super::StationId;

/// A departure as reported by a transit-data provider.
///
/// This is provider-neutral: the HAFAS client converts its wire DTOs into
/// this shape. The delay may be absent when the provider has no realtime
/// data for the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeparture {
    /// Scheduled departure time.
    pub when: DateTime<FixedOffset>,

    /// Current delay in seconds, if known.
    pub delay: Option<i64>,

    /// Line name as shown to riders (e.g. "U2", "M10", "S7").
    pub line_name: String,

    /// Line or trip number, if the provider supplies one.
    pub line_number: Option<String>,

    /// Vehicle type code (e.g. "bus", "tram", "suburban").
    pub product: String,

    /// Direction text (usually the terminus).
    pub direction: String,

    /// Whether the trip has been cancelled.
    pub cancelled: bool,

    /// Station the departure is reported for.
    ///
    /// For meta stations this may be a platform-level stop rather than the
    /// queried station.
    pub station_id: StationId,
}

/// A normalized departure ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Scheduled departure time.
    pub when: DateTime<FixedOffset>,

    /// Delay in seconds. Zero when the provider reported none.
    pub delay: i64,

    /// Line name.
    pub line_name: String,

    /// Line or trip number.
    pub line_number: Option<String>,

    /// Vehicle type code.
    pub product: String,

    /// Direction text.
    pub direction: String,

    /// Cancelled trips stay on the list but can never be caught.
    pub cancelled: bool,
}

impl Departure {
    /// Normalize a raw record. An absent delay becomes zero.
    pub fn from_raw(raw: RawDeparture) -> Self {
        Self {
            when: raw.when,
            delay: raw.delay.unwrap_or(0),
            line_name: raw.line_name,
            line_number: raw.line_number,
            product: raw.product,
            direction: raw.direction,
            cancelled: raw.cancelled,
        }
    }

    /// Scheduled time adjusted by the current delay.
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn effective_time(&self) -> DateTime<FixedOffset> {
        TimeDelta::try_seconds(self.delay)
            .and_then(|delta| self.when.checked_add_signed(delta))
            .unwrap_or_else(|| {
                let bound = if self.delay < 0 {
                    DateTime::<Utc>::MIN_UTC
                } else {
                    DateTime::<Utc>::MAX_UTC
                };
                bound.with_timezone(self.when.offset())
            })
    }

    /// Effective time as milliseconds since the Unix epoch.
    pub fn effective_time_millis(&self) -> i64 {
        self.when
            .timestamp_millis()
            .saturating_add(self.delay.saturating_mul(1000))
    }

    /// Delay rounded down to whole minutes.
    pub fn delay_minutes(&self) -> i64 {
        self.delay.div_euclid(60)
    }
}

/// Departures for one station, ordered by effective time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureList {
    /// The station these departures were fetched for.
    pub station_id: StationId,

    /// Departures, ascending by effective time.
    pub departures: Vec<Departure>,
}

impl DepartureList {
    /// Number of departures.
    pub fn len(&self) -> usize {
        self.departures.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}
