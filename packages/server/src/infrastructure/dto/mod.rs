//! Data Transfer Objects (DTOs).
//!
//! DTOs are organized by direction:
//! - `census`: payload received from the upstream room census API
//! - `http`: HTTP API response DTOs served by this server

pub mod census;
pub mod conversion;
pub mod http;
