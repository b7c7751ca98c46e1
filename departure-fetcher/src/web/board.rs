//! Reachability split for display.
//!
//! A departure is reachable when its effective time is no earlier than
//! `now + delay`, i.e. the rider can still get to the stop in time. Boards
//! show the last few unreachable departures (the near misses) followed by
//! the first few reachable ones. Cancelled departures keep their place on
//! the board but are never reachable.

use chrono::{DateTime, Utc};

use crate::config::FetcherConfig;
use crate::domain::{Departure, DepartureList};

/// A departure with its reachability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub departure: Departure,
    pub reachable: bool,
}

/// Earliest effective time the rider can still catch.
pub fn reachable_from(config: &FetcherConfig, now: DateTime<Utc>) -> DateTime<Utc> {
    now + config.delay_tolerance()
}

/// Split a sorted departure list into the entries shown on a board.
pub fn shape_board(
    list: &DepartureList,
    config: &FetcherConfig,
    now: DateTime<Utc>,
) -> Vec<BoardEntry> {
    let horizon = reachable_from(config, now);

    let (unreachable, reachable): (Vec<&Departure>, Vec<&Departure>) = list
        .departures
        .iter()
        .partition(|d| d.effective_time() < horizon);

    let skip = unreachable
        .len()
        .saturating_sub(config.max_unreachable_departures as usize);

    let near_misses = unreachable.into_iter().skip(skip).map(|d| BoardEntry {
        departure: d.clone(),
        reachable: false,
    });

    let catchable = reachable
        .into_iter()
        .take(config.max_reachable_departures as usize)
        .map(|d| BoardEntry {
            departure: d.clone(),
            reachable: !d.cancelled,
        });

    near_misses.chain(catchable).collect()
}
