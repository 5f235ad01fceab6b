//! Writes raw image buffers to disk so backends can reference them.

use std::path::Path;

use image::RgbImage;
use log::debug;

use gridfig_core::module::{ImageRef, Module};

use crate::error::FigureError;

/// Writes every raw image in `module` to `dir` as a PNG and rewrites the
/// cell to reference the file instead of the buffer.
///
/// Filenames are `{prefix}-{row}-{column}.png` with one-based indices; a
/// stacked cell appends a one-based layer index
/// (`{prefix}-{row}-{column}-{layer}.png`) to every layer, including a
/// stack of one. Images already referenced by path are left untouched.
///
/// # Errors
///
/// [`FigureError::ImageBuffer`] when a buffer's length does not match
/// its pixel dimensions, [`FigureError::Image`] when PNG encoding
/// fails.
pub fn materialize_images(
    module: &mut Module,
    dir: &Path,
    prefix: &str,
) -> Result<(), FigureError> {
    for ((row, column), cell) in module.cells_mut() {
        let images = cell.images_mut();
        // List-shaped cells keep the layer suffix even with one entry, so
        // filenames do not change when layers are added or removed.
        let multi = images.is_multi();
        let images = images.as_mut_slice();
        for (layer, image) in images.iter_mut().enumerate() {
            let ImageRef::Raw(raster) = image else {
                continue;
            };

            let name = if multi {
                format!("{prefix}-{}-{}-{}.png", row + 1, column + 1, layer + 1)
            } else {
                format!("{prefix}-{}-{}.png", row + 1, column + 1)
            };
            let path = dir.join(name);

            let (px_width, px_height, data) = raster.clone().into_parts();
            let buffer = RgbImage::from_raw(px_width, px_height, data)
                .ok_or(FigureError::ImageBuffer { row, column })?;
            buffer.save(&path)?;
            debug!(path = path.display().to_string(); "materialized image");

            *image = ImageRef::File {
                path,
                px_width,
                px_height,
            };
        }
    }
    Ok(())
}
