//! Error types for history navigation.

use carve_scene::SceneError;
use thiserror::Error;

/// Errors that can occur while saving or restoring history states.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// A restore index outside `0..len`. The live project is untouched.
    #[error("history index {index} out of range (0..{len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of snapshots in the stack.
        len: usize,
    },

    /// Navigation was requested on an empty history.
    #[error("history is empty")]
    Empty,

    /// A snapshot failed to serialize or deserialize.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
