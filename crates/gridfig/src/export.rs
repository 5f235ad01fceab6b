//! Rendering backends for aligned figure modules.
//!
//! A [`Generator`] turns one solved [`Module`] into a text fragment on
//! disk; fragments from several modules are later stitched into a single
//! document by [`combine_fragments`]. The [`Backend`] enum names every
//! backend callers may ask for, while [`generator_for`] reports which of
//! them actually have a generator wired up.

mod combine;
mod html;
mod tikz;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use gridfig_core::module::Module;

pub use combine::combine_fragments;
pub use html::HtmlGenerator;
pub use tikz::TikzGenerator;

/// Errors that can occur while generating or combining fragments.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A cell image has not been written to disk yet.
    #[error("image at row {row}, column {column} has no file path")]
    UnmaterializedImage {
        /// Zero-based grid row of the offending cell.
        row: usize,
        /// Zero-based grid column of the offending cell.
        column: usize,
    },

    /// Formatting into the fragment buffer failed.
    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Identifier of a rendering backend.
///
/// Every name callers may request is listed here, including backends
/// without a generator; [`generator_for`] distinguishes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// LaTeX TikZ picture fragments.
    Tikz,
    /// Absolutely positioned HTML.
    Html,
    /// PowerPoint slides (recognized, no generator).
    Pptx,
    /// SDL2 preview window (recognized, no generator).
    Sdl2,
}

impl Backend {
    /// All backend names, in declaration order.
    pub const ALL: [Backend; 4] = [Backend::Tikz, Backend::Html, Backend::Pptx, Backend::Sdl2];

    /// Returns the lowercase name of this backend.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Tikz => "tikz",
            Backend::Html => "html",
            Backend::Pptx => "pptx",
            Backend::Sdl2 => "sdl2",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tikz" => Ok(Backend::Tikz),
            "html" => Ok(Backend::Html),
            "pptx" => Ok(Backend::Pptx),
            "sdl2" => Ok(Backend::Sdl2),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

/// Renders solved modules into text fragments and frames the combined
/// document.
pub trait Generator {
    /// File extension (without dot) used for fragments and the combined
    /// document.
    fn fragment_extension(&self) -> &'static str;

    /// Text emitted before the first fragment in the combined document.
    fn document_prologue(&self) -> &'static str;

    /// Text emitted after the last fragment in the combined document.
    fn document_epilogue(&self) -> &'static str;

    /// Renders `module` into `dir`, writing a fragment file with the
    /// given stem (extension appended by the generator).
    ///
    /// The module must already be solved: its total width and height are
    /// set and every cell image carries a file path.
    fn generate(&self, module: &Module, dir: &Path, stem: &str) -> Result<(), ExportError>;
}

/// Looks up the generator for a backend, if one exists.
///
/// Returns `None` for backends that are recognized names but have no
/// generator wired up.
pub fn generator_for(backend: Backend) -> Option<&'static dyn Generator> {
    static TIKZ: TikzGenerator = TikzGenerator;
    static HTML: HtmlGenerator = HtmlGenerator;
    match backend {
        Backend::Tikz => Some(&TIKZ),
        Backend::Html => Some(&HTML),
        Backend::Pptx | Backend::Sdl2 => None,
    }
}
