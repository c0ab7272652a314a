//! UseCase: ルーム状態の取得
//!
//! 設定されたルームの参加者数を `RoomStatusCache` 経由で取得します。
//! 失敗時は詳細（URL・原因）をログに残し、エラーをそのまま UI 層に返します。
//! UI 層はエラーの詳細をクライアントに返してはいけません。

use std::sync::Arc;

use crate::domain::{CensusError, RoomRecord};

use super::RoomStatusCache;

/// ルーム状態取得のユースケース
pub struct GetRoomStatusUseCase {
    /// RoomStatusCache（上流 API の前段にあるキャッシュ）
    cache: Arc<RoomStatusCache>,
}

impl GetRoomStatusUseCase {
    /// 新しい GetRoomStatusUseCase を作成
    pub fn new(cache: Arc<RoomStatusCache>) -> Self {
        Self { cache }
    }

    /// ルーム状態の取得を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RoomRecord)` - 取得成功（census にルームがない場合は参加者 0 人）
    /// * `Err(CensusError)` - 上流 API の呼び出しまたはデコードに失敗
    pub async fn execute(&self) -> Result<RoomRecord, CensusError> {
        self.cache.get().await.inspect_err(|e| {
            tracing::error!(
                "Failed to get status of room '{}': {}",
                self.cache.room_name(),
                e
            );
        })
    }
}
