//! Domain types for departure boards.
//!
//! Provider-neutral types: the HAFAS client converts into these, the
//! fetcher filters and sorts them, and the web layer renders them.

mod departure;
mod query;
mod station_id;

pub use departure::{Departure, DepartureList, RawDeparture};
pub use query::DepartureQuery;
pub use station_id::{InvalidStationId, StationId};
