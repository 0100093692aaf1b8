//! Error types for the scene-graph engine.

use thiserror::Error;

/// Errors that can occur while (de)serializing or rebuilding a project.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The project text was not valid JSON, or its structure did not match
    /// the exchange format.
    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A node id did not follow the `node_<integer>` format.
    #[error("invalid node id `{0}` (expected `node_<n>`)")]
    InvalidNodeId(String),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
