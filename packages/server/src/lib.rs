//! Room status server library.
//!
//! Reports the participant count of one configured room by querying the
//! upstream room census API, caching the result for a short interval so that
//! bursts of requests turn into at most one upstream call per interval.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
