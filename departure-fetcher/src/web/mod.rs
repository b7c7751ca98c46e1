//! Web layer for departure boards.
//!
//! Provides JSON and HTML endpoints showing each configured station's
//! departures, split into reachable and unreachable ones.

mod board;
mod dto;
mod routes;
mod state;
pub mod templates;

pub use board::{BoardEntry, reachable_from, shape_board};
pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
