//! Error types for layout merging and module normalization.

use thiserror::Error;

/// Failure while merging a layout document or normalizing module data.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The module grid has zero rows or zero columns.
    #[error("module grid has no cells")]
    EmptyGrid,

    /// The module grid is not rectangular.
    #[error("module grid is ragged: row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// The first cell carries no image, so the module aspect ratio cannot
    /// be determined.
    #[error("first cell has no image to derive the module aspect ratio from")]
    MissingFirstImage,

    /// A dotted-path override names a key that does not exist in the
    /// default layout document.
    #[error("unknown layout option `{path}`")]
    UnknownKey { path: String },

    /// The merged layout document does not deserialize into a layout.
    #[error("layout document error: {0}")]
    Document(#[from] serde_json::Error),
}
