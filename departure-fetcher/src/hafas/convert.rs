//! Conversion from HAFAS DTOs to domain types.

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::domain::{RawDeparture, StationId};

use super::types::DepartureDto;

/// Largest delay, in either direction, accepted from the provider (one day).
pub const MAX_DELAY_SECS: i64 = 24 * 60 * 60;

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Failed to parse a stop id
    #[error("invalid stop id: {0:?}")]
    InvalidStopId(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Delay outside of `MAX_DELAY_SECS`
    #[error("delay out of range: {0}s")]
    DelayOutOfRange(i64),
}

/// Convert a list of departures, skipping records that cannot be used.
pub fn convert_departures(departures: &[DepartureDto]) -> Vec<RawDeparture> {
    let mut results = Vec::with_capacity(departures.len());

    for dto in departures {
        match convert_departure(dto) {
            Ok(raw) => results.push(raw),
            Err(e) => {
                warn!(
                    trip_id = dto.trip_id.as_deref().unwrap_or("?"),
                    error = %e,
                    "skipping departure"
                );
            }
        }
    }

    results
}

/// Convert a single departure.
///
/// The scheduled time is `plannedWhen` when present; legacy responses only
/// carry `when`, which was the scheduled time there.
pub fn convert_departure(dto: &DepartureDto) -> Result<RawDeparture, ConversionError> {
    let when = dto
        .planned_when
        .as_deref()
        .or(dto.when.as_deref())
        .ok_or(ConversionError::MissingField("plannedWhen"))?;
    let when = parse_time(when)?;

    let stop_id = dto
        .stop
        .as_ref()
        .and_then(|s| s.id.as_deref())
        .ok_or(ConversionError::MissingField("stop.id"))?;
    let station_id = StationId::parse(stop_id)
        .map_err(|_| ConversionError::InvalidStopId(stop_id.to_string()))?;

    let line = dto
        .line
        .as_ref()
        .ok_or(ConversionError::MissingField("line"))?;
    let line_name = line
        .name
        .clone()
        .ok_or(ConversionError::MissingField("line.name"))?;
    let product = line
        .product
        .clone()
        .ok_or(ConversionError::MissingField("line.product"))?;

    if let Some(d) = dto.delay.filter(|d| d.unsigned_abs() > MAX_DELAY_SECS.unsigned_abs()) {
        return Err(ConversionError::DelayOutOfRange(d));
    }

    let line_number = line.fahrt_nr.as_ref().and_then(|nr| match nr {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    Ok(RawDeparture {
        when,
        delay: dto.delay,
        line_name,
        line_number,
        product,
        direction: dto.direction.clone().unwrap_or_default(),
        cancelled: dto.cancelled.unwrap_or(false),
        station_id,
    })
}

fn parse_time(s: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
    DateTime::parse_from_rfc3339(s).map_err(|_| ConversionError::InvalidTime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(json: &str) -> DepartureDto {
        serde_json::from_str(json).unwrap()
    }

    const FULL: &str = r#"{
        "tripId": "1|31817|0|86|19102026",
        "stop": {"id": "900000100703", "name": "S+U Alexanderplatz [U2]"},
        "when": "2026-10-19T10:04:00+02:00",
        "plannedWhen": "2026-10-19T10:02:00+02:00",
        "delay": 120,
        "direction": "S+U Pankow",
        "line": {"name": "U2", "fahrtNr": "16712", "product": "subway"}
    }"#;

    #[test]
    fn converts_full_record() {
        let raw = convert_departure(&dto(FULL)).unwrap();

        assert_eq!(
            raw.when,
            DateTime::parse_from_rfc3339("2026-10-19T10:02:00+02:00").unwrap()
        );
        assert_eq!(raw.delay, Some(120));
        assert_eq!(raw.line_name, "U2");
        assert_eq!(raw.line_number.as_deref(), Some("16712"));
        assert_eq!(raw.product, "subway");
        assert_eq!(raw.direction, "S+U Pankow");
        assert_eq!(raw.station_id.as_str(), "900000100703");
        assert!(!raw.cancelled);
    }

    #[test]
    fn planned_when_preferred_over_when() {
        let raw = convert_departure(&dto(FULL)).unwrap();
        assert_eq!(raw.when.format("%H:%M").to_string(), "10:02");
    }

    #[test]
    fn legacy_when_and_numeric_nr() {
        let raw = convert_departure(&dto(
            r#"{
                "station": {"id": "900000100003"},
                "when": "2026-10-19T10:02:00+02:00",
                "delay": null,
                "line": {"name": "M4", "nr": 4, "product": "tram"}
            }"#,
        ))
        .unwrap();

        assert_eq!(raw.when.format("%H:%M").to_string(), "10:02");
        assert_eq!(raw.delay, None);
        assert_eq!(raw.line_number.as_deref(), Some("4"));
        assert_eq!(raw.direction, "");
    }

    #[test]
    fn cancelled_departure_uses_planned_time() {
        let raw = convert_departure(&dto(
            r#"{
                "stop": {"id": "900000100003"},
                "when": null,
                "plannedWhen": "2026-10-19T10:02:00+02:00",
                "cancelled": true,
                "line": {"name": "M4", "product": "tram"}
            }"#,
        ))
        .unwrap();

        assert_eq!(raw.when.format("%H:%M").to_string(), "10:02");
        assert!(raw.cancelled);
    }

    #[test]
    fn absurd_delays_are_rejected() {
        let record = |delay: &str| {
            FULL.replace(r#""delay": 120"#, &format!(r#""delay": {delay}"#))
        };

        let err = convert_departure(&dto(&record("10000000000000000"))).unwrap_err();
        assert!(matches!(err, ConversionError::DelayOutOfRange(10_000_000_000_000_000)));

        let err = convert_departure(&dto(&record(&i64::MIN.to_string()))).unwrap_err();
        assert!(matches!(err, ConversionError::DelayOutOfRange(i64::MIN)));

        let raw = convert_departure(&dto(&record(&(-MAX_DELAY_SECS).to_string()))).unwrap();
        assert_eq!(raw.delay, Some(-MAX_DELAY_SECS));
    }

    #[test]
    fn missing_fields_are_errors() {
        let err = convert_departure(&dto(r#"{"stop": {"id": "1"}}"#)).unwrap_err();
        assert_eq!(err.to_string(), "missing required field: plannedWhen");

        let err = convert_departure(&dto(r#"{"when": "2026-10-19T10:02:00+02:00"}"#)).unwrap_err();
        assert_eq!(err.to_string(), "missing required field: stop.id");

        let err = convert_departure(&dto(
            r#"{"when": "2026-10-19T10:02:00+02:00", "stop": {"id": "1"}, "line": {"name": "U2"}}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "missing required field: line.product");
    }

    #[test]
    fn invalid_time_is_error() {
        let err = convert_departure(&dto(r#"{"when": "10:02", "stop": {"id": "1"}}"#)).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidTime(_)));
    }

    #[test]
    fn convert_departures_skips_bad_records() {
        let huge = FULL.replace(r#""delay": 120"#, r#""delay": 9000000000000000000"#);
        let dtos = vec![dto(FULL), dto("{}"), dto(&huge), dto(FULL)];
        assert_eq!(convert_departures(&dtos).len(), 2);
    }
}
