//! Error type for the CLI layer.

use std::path::PathBuf;

use thiserror::Error;

use gridfig::FigureError;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse figure description: {0}")]
    Description(#[from] serde_json::Error),

    #[error("Failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Crop marker at row {row}, column {column} is outside the image grid")]
    CropMarkerOutOfGrid { row: usize, column: usize },

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Failed to parse TOML configuration: {0}")]
    ConfigParse(String),

    #[error("Missing configuration file: {0}")]
    MissingConfigFile(PathBuf),

    #[error(transparent)]
    Figure(#[from] FigureError),
}
