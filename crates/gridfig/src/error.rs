//! Error types for figure assembly.
//!
//! This module provides the main error type [`FigureError`] which wraps the
//! error conditions that can occur while a figure is merged, aligned,
//! materialized and rendered.

use std::io;

use thiserror::Error;

use gridfig_core::dimension::DimensionError;
use gridfig_merge::MergeError;

use crate::export::{Backend, ExportError};

/// The main error type for figure-generation calls.
///
/// Every variant aborts the current call; layout solving is deterministic,
/// so nothing is retried.
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Layout(#[from] DimensionError),

    /// The N-module aligner was handed zero modules.
    #[error("cannot align an empty figure: at least one module is required")]
    EmptyFigure,

    /// The common-height solve produced a non-positive height: the target
    /// width is too small for the fixed decorations present.
    #[error(
        "solved common height {height:.2} mm is not positive; target width \
         {width:.2} mm cannot fit the fixed decorations"
    )]
    NonPositiveHeight { height: f64, width: f64 },

    /// The requested backend has no registered generator.
    #[error("backend `{0}` is not available")]
    UnsupportedBackend(Backend),

    /// A raw image buffer does not match its declared pixel dimensions.
    #[error("image buffer at cell ({row}, {column}) does not match its pixel dimensions")]
    ImageBuffer { row: usize, column: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<ExportError> for FigureError {
    fn from(error: ExportError) -> Self {
        Self::Export(Box::new(error))
    }
}
