//! Room census client implementations
//!
//! - `http`: Prosody の `/room-census` エンドポイントを HTTP で呼び出す実装

pub mod http;

pub use http::{HttpRoomCensusClient, ROOM_CENSUS_PATH, room_census_url};
