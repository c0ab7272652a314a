//! Value objects

use std::fmt;

use super::error::ValueObjectError;

/// Name of a room tracked by the upstream census.
///
/// Comparison is exact and case-sensitive, the same way the census reports names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::RoomNameEmpty` if `value` is empty.
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
