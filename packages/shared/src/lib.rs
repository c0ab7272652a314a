//! Shared utilities for the peephole packages.

pub mod logger;
pub mod time;
