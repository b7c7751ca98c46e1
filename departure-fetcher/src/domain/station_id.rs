//! Station identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A provider station identifier (e.g. the HAFAS id `900000100003`).
///
/// Identifiers are opaque to us, but never empty and never contain
/// whitespace. This type guarantees that by construction.
///
/// # Examples
///
/// ```
/// use departure_fetcher::domain::StationId;
///
/// let alex = StationId::parse("900000100003").unwrap();
/// assert_eq!(alex.as_str(), "900000100003");
///
/// // Empty and whitespace-containing ids are rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("9000 01").is_err());
///
/// // The normalized form trims surrounding whitespace first
/// assert!(StationId::parse_normalized(" 900000100003\n").is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStationId {
                reason: "must not contain whitespace",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Parse a station id after trimming surrounding whitespace.
    ///
    /// Useful for user input such as URL path segments.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationId> {
        Self::parse(s.trim())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
