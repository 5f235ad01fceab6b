//! Gridfig - assembles scientific figures from grids of raster images.
//!
//! Modules (rectangular image grids with captions, frames, crop markers
//! and title bars) are merged from layout documents, aligned side by
//! side to one common height filling a target width, and rendered
//! through a pluggable backend into a single output document.

pub mod config;
pub mod export;
pub mod layout;

mod error;
mod images;

pub use gridfig_core::{color, dimension, geometry, module};
pub use gridfig_merge::{CellData, ModuleData, TitleOverride};

pub use error::FigureError;
pub use images::materialize_images;

use std::path::Path;

use log::{debug, info};

use serde_json::{Map, Value};

use gridfig_core::module::Module;

use config::AppConfig;
use export::{Backend, generator_for};

/// One module's worth of user input: dotted-path layout overrides plus
/// the image grid and its decorations.
#[derive(Debug, Default)]
pub struct ModuleInput {
    /// Layout overrides in dotted-path notation, merged into the
    /// built-in defaults.
    pub layout: Map<String, Value>,
    /// Image grid, captions, frames, markers and title texts.
    pub data: ModuleData,
}

/// Builder for assembling and rendering multi-module figures.
///
/// # Examples
///
/// ```rust,no_run
/// use gridfig::{FigureBuilder, ModuleInput, config::AppConfig};
///
/// let builder = FigureBuilder::new(AppConfig::default());
/// let inputs = vec![ModuleInput::default()];
///
/// // Render a 14cm wide figure into the current directory.
/// builder.horizontal_figure(inputs, 14.0, None, ".".as_ref())
///     .expect("Failed to render figure");
/// ```
#[derive(Default)]
pub struct FigureBuilder {
    config: AppConfig,
}

impl FigureBuilder {
    /// Create a new figure builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Merge every input into a render-ready, still unsized [`Module`].
    ///
    /// # Errors
    ///
    /// Returns [`FigureError::Merge`] when an input's layout overrides
    /// name unknown keys or its grid is empty or ragged.
    pub fn assemble(&self, inputs: Vec<ModuleInput>) -> Result<Vec<Module>, FigureError> {
        info!(modules = inputs.len(); "assembling figure modules");

        inputs
            .into_iter()
            .map(|input| {
                let layout = gridfig_merge::load_layout(&input.layout)?;
                let module = gridfig_merge::merge_module(layout, input.data)?;
                Ok(module)
            })
            .collect()
    }

    /// Align assembled modules to one common height filling
    /// `combined_width` millimeters. See [`layout::align_modules`].
    pub fn align(&self, modules: &mut [Module], combined_width: f64) -> Result<(), FigureError> {
        layout::align_modules(modules, combined_width)
    }

    /// Materialize each module's images and render it through `backend`
    /// into `dir`, then combine the fragments into one document.
    ///
    /// Modules must already be aligned. Returns the path of the combined
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`FigureError::UnsupportedBackend`] for backends without
    /// a generator, [`FigureError::ImageBuffer`] or [`FigureError::Image`]
    /// when image materialization fails, and [`FigureError::Export`] when
    /// fragment generation or combination fails.
    pub fn render(
        &self,
        modules: &mut [Module],
        backend: Backend,
        dir: &Path,
    ) -> Result<std::path::PathBuf, FigureError> {
        let generator = generator_for(backend).ok_or(FigureError::UnsupportedBackend(backend))?;
        let fragment_stem = self.config.render().fragment_stem();

        for (index, module) in modules.iter_mut().enumerate() {
            let stem = format!("{fragment_stem}{index}");
            debug!(module = index, backend = backend.name(); "rendering module");
            materialize_images(module, dir, &stem)?;
            generator.generate(module, dir, &stem)?;
        }

        let document = export::combine_fragments(
            dir,
            fragment_stem,
            self.config.render().document_stem(),
            generator,
        )?;
        Ok(document)
    }

    /// End-to-end pipeline: assemble, align to `width_cm` centimeters,
    /// render and combine.
    ///
    /// This is the main entry point. `backend` falls back to the
    /// configured default when `None`. Internally all lengths are in
    /// millimeters; this is the one place centimeters are converted.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from any stage; no combined document
    /// is produced on error, but fragments and images of
    /// already-processed modules are not removed.
    pub fn horizontal_figure(
        &self,
        inputs: Vec<ModuleInput>,
        width_cm: f64,
        backend: Option<Backend>,
        dir: &Path,
    ) -> Result<std::path::PathBuf, FigureError> {
        let backend = backend.unwrap_or(self.config.render().backend());
        info!(width_cm = width_cm, backend = backend.name(); "generating figure");

        let mut modules = self.assemble(inputs)?;
        self.align(&mut modules, width_cm * 10.0)?;
        self.render(&mut modules, backend, dir)
    }
}
