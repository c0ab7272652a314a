//! Entities

use super::value_object::RoomName;

/// Last known state of one room.
///
/// Replaced wholesale on every successful census fetch, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    /// ルーム名
    pub name: RoomName,
    /// 参加者数
    pub participant_count: i64,
    /// ルームの作成時刻（Unix 秒）
    pub created_time: Option<i64>,
}

impl RoomRecord {
    pub fn new(name: RoomName, participant_count: i64, created_time: Option<i64>) -> Self {
        Self {
            name,
            participant_count,
            created_time,
        }
    }

    /// Placeholder for a room the census does not list: zero participants,
    /// no creation time.
    pub fn empty(name: RoomName) -> Self {
        Self::new(name, 0, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_no_participants() {
        // テスト項目: 空のレコードは参加者 0 人で作成時刻を持たない
        // given (前提条件):
        let name = RoomName::new("room1".to_string()).unwrap();

        // when (操作):
        let record = RoomRecord::empty(name.clone());

        // then (期待する結果):
        assert_eq!(record.name, name);
        assert_eq!(record.participant_count, 0);
        assert_eq!(record.created_time, None);
    }
}
