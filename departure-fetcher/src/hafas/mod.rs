//! HAFAS REST client.
//!
//! This module provides an HTTP client for `hafas-rest-api` instances
//! (such as `v6.vbb.transport.rest`), which expose HAFAS public-transport
//! data as JSON.
//!
//! Key characteristics of the API:
//! - Stop ids are opaque strings; meta stations report departures for
//!   their individual platform stops
//! - `when` is the realtime prognosis and `plannedWhen` the schedule, both
//!   ISO 8601 with offset
//! - `delay` is in seconds and `null` when no realtime data exists

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, HafasClient, HafasConfig};
pub use convert::{ConversionError, MAX_DELAY_SECS, convert_departure, convert_departures};
pub use error::HafasError;
pub use mock::MockHafasClient;
pub use types::{DepartureDto, DeparturesResponse, LineDto, StopDto, StopRefDto};
