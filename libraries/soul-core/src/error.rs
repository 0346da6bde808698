/// Core error types for Soul Player
use crate::types::GroupKey;
use thiserror::Error;

/// Result type alias using `SoulError`
pub type Result<T> = std::result::Result<T, SoulError>;

/// Core error type for Soul Player
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoulError {
    /// Index outside of a collection
    #[error("Index out of bounds: {index} (size {size})")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Size of the collection
        size: usize,
    },

    /// Group does not exist in the playlist
    #[error("Group not found: {0}")]
    GroupNotFound(GroupKey),
}

impl SoulError {
    /// Create an index out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }
}
