//! Public-transit departure boards.
//!
//! Fetches upcoming departures for configured stations from a HAFAS REST
//! endpoint, drops unwanted stops, vehicle types and lines, and serves the
//! time-ordered result as JSON and HTML boards.

pub mod config;
pub mod domain;
pub mod fetcher;
pub mod hafas;
pub mod provider;
pub mod web;
