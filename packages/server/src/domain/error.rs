//! Domain errors

use std::{error::Error as StdError, sync::Arc};

use thiserror::Error;

/// Shared, cloneable error cause.
///
/// Held in an `Arc` so that one failed refresh can be handed to every caller
/// that was waiting on it.
pub type ErrorSource = Arc<dyn StdError + Send + Sync>;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Room name is empty
    #[error("Room name must not be empty")]
    RoomNameEmpty,
}

/// Errors raised while obtaining the room census
///
/// "Room not listed" is not an error; it resolves to a zero-participant record.
#[derive(Debug, Clone, Error)]
pub enum CensusError {
    /// The upstream call could not be completed (DNS, connection, transport)
    #[error("failed to fetch room census from {url:?}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ErrorSource,
    },

    /// The response body is not a census payload
    #[error("failed to parse room census payload: {source}")]
    Decode {
        #[source]
        source: ErrorSource,
    },
}

impl CensusError {
    pub fn fetch(url: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Fetch {
            url: url.into(),
            source: Arc::new(source),
        }
    }

    pub fn decode(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Decode {
            source: Arc::new(source),
        }
    }

    #[cfg(test)]
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    #[cfg(test)]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
