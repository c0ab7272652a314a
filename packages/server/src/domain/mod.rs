//! Domain layer
//!
//! ルームの状態を表すモデルと、上流の room census API へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod census;
pub mod entity;
pub mod error;
pub mod value_object;

pub use census::{RoomCensusClient, find_room};
pub use entity::RoomRecord;
pub use error::{CensusError, ValueObjectError};
pub use value_object::RoomName;

#[cfg(test)]
pub use census::MockRoomCensusClient;
