//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room status response body
///
/// `created_time` is omitted from the JSON when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatusDto {
    pub room_name: String,
    pub participants: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_status_serializes_created_time() {
        // テスト項目: created_time がある場合は数値として出力される
        // given (前提条件):
        let dto = RoomStatusDto {
            room_name: "room1".to_string(),
            participants: 3,
            created_time: Some(1_700_000_000),
        };

        // when (操作):
        let json = serde_json::to_string(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            r#"{"room_name":"room1","participants":3,"created_time":1700000000}"#
        );
    }

    #[test]
    fn test_room_status_omits_missing_created_time() {
        // テスト項目: created_time がない場合はフィールドごと省略される
        // given (前提条件):
        let dto = RoomStatusDto {
            room_name: "room1".to_string(),
            participants: 0,
            created_time: None,
        };

        // when (操作):
        let json = serde_json::to_string(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"room_name":"room1","participants":0}"#);
    }
}
