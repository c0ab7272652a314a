//! Conversion logic between DTOs and domain entities.

use crate::domain::{RoomName, RoomRecord, ValueObjectError};
use crate::infrastructure::dto::{census::RoomCensusEntry, http::RoomStatusDto};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<RoomCensusEntry> for RoomRecord {
    type Error = ValueObjectError;

    fn try_from(dto: RoomCensusEntry) -> Result<Self, Self::Error> {
        Ok(Self::new(
            RoomName::new(dto.room_name)?,
            dto.participants,
            dto.created_time,
        ))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<RoomRecord> for RoomStatusDto {
    fn from(model: RoomRecord) -> Self {
        Self {
            room_name: model.name.into_string(),
            participants: model.participant_count,
            created_time: model.created_time,
        }
    }
}
