//! Server state.

use std::sync::Arc;

use crate::usecase::GetRoomStatusUseCase;

/// Shared application state
pub struct AppState {
    /// GetRoomStatusUseCase（ルーム状態取得のユースケース）
    pub get_room_status_usecase: Arc<GetRoomStatusUseCase>,
}
