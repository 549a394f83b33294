//! # Dungeon Error Types
//!
//! All errors that can occur while building or generating a dungeon.

use thiserror::Error;

/// Errors that can occur in the dungeon generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DungeonError {
    /// Grid size below one, or too large to allocate.
    #[error("invalid dungeon size {0}: size must be at least 1 and the grid must fit in memory")]
    InvalidSize(i64),

    /// A tile picked for collapse had no candidates left.
    ///
    /// Recovered by the generation loop: the tile stays collapsed with no
    /// feature and renders as empty.
    #[error("constraints exhausted at ({x}, {y}): no candidate features remain")]
    ConstraintExhausted {
        /// Column of the exhausted tile.
        x: usize,
        /// Row of the exhausted tile.
        y: usize,
    },

    /// The random probe could not find an uncollapsed tile within its budget.
    ///
    /// Recovered by ending the generation loop early.
    #[error("unable to find an uncollapsed tile after {attempts} attempts")]
    ProbeExhausted {
        /// Number of picks made before giving up.
        attempts: usize,
    },

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),
}

/// Result type for dungeon operations.
pub type DungeonResult<T> = Result<T, DungeonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_location() {
        let err = DungeonError::ConstraintExhausted { x: 3, y: 4 };
        assert!(err.to_string().contains("(3, 4)"));
        assert_eq!(
            DungeonError::InvalidSize(-2).to_string(),
            "invalid dungeon size -2: size must be at least 1 and the grid must fit in memory"
        );
    }
}
