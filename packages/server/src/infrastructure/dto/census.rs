//! Room census payload DTOs.
//!
//! The upstream module is not consistent about how it encodes an empty
//! census, nor about how it encodes `created_time`:
//!
//! ```text
//! {"room_census": [ ... ]}     list of rooms
//! {"room_census": {}}          no rooms (empty Lua table serialized as object)
//! {}                           no rooms
//! "created_time": "1700000000" string-encoded seconds
//! "created_time": 1700000000   plain seconds
//! ```
//!
//! Both variants are accepted here so that the rest of the crate only sees a
//! list of entries and an optional integer.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Top-level payload returned by `GET /room-census`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomCensusPayload {
    #[serde(default, deserialize_with = "deserialize_room_census")]
    pub room_census: Vec<RoomCensusEntry>,
}

/// One active room as reported by the census
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomCensusEntry {
    pub room_name: String,
    pub participants: i64,
    #[serde(default, deserialize_with = "deserialize_created_time")]
    pub created_time: Option<i64>,
}

impl RoomCensusPayload {
    /// Decode a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

fn deserialize_room_census<'de, D>(deserializer: D) -> Result<Vec<RoomCensusEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).map_err(D::Error::custom))
            .collect(),
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => Err(D::Error::custom(format!(
            "room_census: expected a list of rooms or an empty object, found {}",
            describe(&other)
        ))),
    }
}

fn deserialize_created_time<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("created_time: {number} is not an integer"))),
        Value::String(text) => text.trim().parse::<i64>().map(Some).map_err(|e| {
            D::Error::custom(format!("created_time: invalid integer string {text:?}: {e}"))
        }),
        other => Err(D::Error::custom(format!(
            "created_time: expected an integer or a string, found {}",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a non-empty object",
    }
}
