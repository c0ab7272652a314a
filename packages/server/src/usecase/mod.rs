//! UseCase layer
//!
//! アプリケーションのユースケースを実装します。

mod get_room_status;
mod room_status_cache;

pub use get_room_status::GetRoomStatusUseCase;
pub use room_status_cache::{DEFAULT_CACHE_EXPIRY, RoomStatusCache};
