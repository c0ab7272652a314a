//! HTTP handlers.

mod http;

pub use http::{get_room_status, health_check};
