//! Room census trait 定義
//!
//! ドメイン層が必要とする上流 API へのインターフェースを定義します。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しません。

use async_trait::async_trait;

use super::{CensusError, RoomName, RoomRecord};

/// Room census client trait
///
/// One call to `fetch` is one upstream request. Implementations do not retry
/// and do not cache; both concerns belong to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomCensusClient: Send + Sync {
    /// Fetch the census and extract the record for `room_name`
    ///
    /// A room missing from the census yields `RoomRecord::empty(room_name)`.
    async fn fetch(&self, room_name: &RoomName) -> Result<RoomRecord, CensusError>;
}

/// Pick the record for `target` out of a census.
///
/// The first entry whose name matches exactly wins. When nothing matches,
/// including an empty census, the zero-participant placeholder is returned.
pub fn find_room<I>(census: I, target: &RoomName) -> RoomRecord
where
    I: IntoIterator<Item = RoomRecord>,
{
    census
        .into_iter()
        .find(|room| room.name == *target)
        .unwrap_or_else(|| RoomRecord::empty(target.clone()))
}
