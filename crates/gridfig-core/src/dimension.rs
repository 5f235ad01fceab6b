//! Pure sizing computations over a single module.
//!
//! A module's physical size splits into two parts: a *fixed* contribution
//! from non-scaling decorations (padding, titles, title bars, caption slots,
//! inter-cell spacing) and an *image area* that scales uniformly while
//! keeping its native aspect ratio. The image-area height/width ratio of a
//! module is
//!
//! ```text
//! a = num_rows / num_columns * px_height / px_width
//! ```
//!
//! so for a solved module the invariant
//!
//! ```text
//! total_width / total_height
//!     == (min_width + image_area_width) / (min_height + image_area_height)
//! image_area_height == a * image_area_width
//! ```
//!
//! holds. Every function here is deterministic and side-effect free;
//! re-invoking with the same module snapshot yields the same result.

use log::trace;
use thiserror::Error;

use crate::{
    geometry::{Direction, Size},
    module::Module,
};

/// Failure of a sizing computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    /// The fixed decorations alone exceed the requested total extent, so
    /// the image area would collapse to zero or negative size.
    #[error(
        "invalid layout: fixed decorations ({fixed:.2} mm) leave no image area \
         at total {axis} {total:.2} mm"
    )]
    InvalidLayout {
        /// `"width"` or `"height"`, whichever axis collapsed.
        axis: &'static str,
        /// Fixed decoration budget on that axis, in millimeters.
        fixed: f64,
        /// Requested total extent on that axis, in millimeters.
        total: f64,
    },
}

/// The module aspect ratio `a`: image-area height over image-area width.
pub fn aspect_ratio(module: &Module) -> f64 {
    module.num_rows() as f64 / module.num_columns() as f64 * module.px_height() as f64
        / module.px_width() as f64
}

/// Fixed width contributed by non-scaling decorations, independent of the
/// image content and of `total_width`/`total_height`.
///
/// Contributions: east/west padding, east/west figure titles, east/west row
/// title bars, east/west caption slots (one per column), and horizontal
/// spacing between columns.
pub fn min_width(module: &Module) -> f64 {
    let layout = module.layout();
    let columns = module.num_columns() as f64;

    layout.padding().horizontal_sum()
        + layout.titles().get(Direction::East).extent()
        + layout.titles().get(Direction::West).extent()
        + layout.row_titles().east.extent()
        + layout.row_titles().west.extent()
        + columns * layout.captions().get(Direction::East).extent()
        + columns * layout.captions().get(Direction::West).extent()
        + (columns - 1.0) * layout.spacing().horizontal
}

/// Fixed height contributed by non-scaling decorations; the vertical
/// counterpart of [`min_width`].
pub fn min_height(module: &Module) -> f64 {
    let layout = module.layout();
    let rows = module.num_rows() as f64;

    layout.padding().vertical_sum()
        + layout.titles().get(Direction::North).extent()
        + layout.titles().get(Direction::South).extent()
        + layout.column_titles().north.extent()
        + layout.column_titles().south.extent()
        + rows * layout.captions().get(Direction::North).extent()
        + rows * layout.captions().get(Direction::South).extent()
        + (rows - 1.0) * layout.spacing().vertical
}

/// Derives the full module size from a target total width.
///
/// The image area gets whatever the fixed decorations leave over, and the
/// height follows from the aspect ratio:
///
/// ```text
/// image_area_width  = total_width - min_width
/// image_area_height = image_area_width * a
/// total_height      = image_area_height + min_height
/// ```
///
/// # Errors
///
/// [`DimensionError::InvalidLayout`] when `image_area_width <= 0`.
pub fn size_for_total_width(module: &Module, total_width: f64) -> Result<Size, DimensionError> {
    let fixed = min_width(module);
    let image_area_width = total_width - fixed;
    if image_area_width <= 0.0 {
        return Err(DimensionError::InvalidLayout {
            axis: "width",
            fixed,
            total: total_width,
        });
    }

    let image_area_height = image_area_width * aspect_ratio(module);
    let size = Size::new(total_width, image_area_height + min_height(module));
    trace!(width = size.width(), height = size.height(); "sized module from total width");
    Ok(size)
}

/// Derives the full module size from a target total height; the symmetric
/// operation of [`size_for_total_width`].
///
/// # Errors
///
/// [`DimensionError::InvalidLayout`] when `image_area_height <= 0`.
pub fn size_for_total_height(module: &Module, total_height: f64) -> Result<Size, DimensionError> {
    let fixed = min_height(module);
    let image_area_height = total_height - fixed;
    if image_area_height <= 0.0 {
        return Err(DimensionError::InvalidLayout {
            axis: "height",
            fixed,
            total: total_height,
        });
    }

    let image_area_width = image_area_height / aspect_ratio(module);
    let size = Size::new(image_area_width + min_width(module), total_height);
    trace!(width = size.width(), height = size.height(); "sized module from total height");
    Ok(size)
}

/// Image-area widths `(w_a, w_b)` that give both modules an equal
/// image-area height while the pair fills `combined_width` exactly:
///
/// ```text
/// w_a + min_width(a) + w_b + min_width(b) == combined_width
/// w_a * aspect_ratio(a) == w_b * aspect_ratio(b)
/// ```
///
/// # Errors
///
/// [`DimensionError::InvalidLayout`] when the two fixed widths alone meet
/// or exceed `combined_width`.
pub fn body_widths_for_equal_heights(
    a: &Module,
    b: &Module,
    combined_width: f64,
) -> Result<(f64, f64), DimensionError> {
    let fixed = min_width(a) + min_width(b);
    let budget = combined_width - fixed;
    if budget <= 0.0 {
        return Err(DimensionError::InvalidLayout {
            axis: "width",
            fixed,
            total: combined_width,
        });
    }

    let ratio_a = aspect_ratio(a);
    let ratio_b = aspect_ratio(b);
    let width_a = budget * ratio_b / (ratio_a + ratio_b);
    Ok((width_a, budget - width_a))
}

/// Cell placement inside a solved module, in module-local millimeter
/// coordinates (origin at the module's north-west corner).
///
/// Backends use this to position each image; it is derived entirely from
/// the module's solved size and decoration budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFrame {
    origin_x: f64,
    origin_y: f64,
    cell_width: f64,
    cell_height: f64,
    step_x: f64,
    step_y: f64,
}

impl GridFrame {
    /// Computes the placement grid of a solved module.
    pub fn of(module: &Module) -> Self {
        let layout = module.layout();
        let captions = layout.captions();

        let caption_west = captions.get(Direction::West).extent();
        let caption_east = captions.get(Direction::East).extent();
        let caption_north = captions.get(Direction::North).extent();
        let caption_south = captions.get(Direction::South).extent();

        let cell_width = (module.total_width() - min_width(module)) / module.num_columns() as f64;
        let cell_height = (module.total_height() - min_height(module)) / module.num_rows() as f64;

        let origin_x = layout.padding().get(Direction::West)
            + layout.titles().get(Direction::West).extent()
            + layout.row_titles().west.extent()
            + caption_west;
        let origin_y = layout.padding().get(Direction::North)
            + layout.titles().get(Direction::North).extent()
            + layout.column_titles().north.extent()
            + caption_north;

        Self {
            origin_x,
            origin_y,
            cell_width,
            cell_height,
            step_x: cell_width + layout.spacing().horizontal + caption_west + caption_east,
            step_y: cell_height + layout.spacing().vertical + caption_north + caption_south,
        }
    }

    /// North-west corner of the image in the given cell.
    pub fn cell_origin(&self, row: usize, column: usize) -> (f64, f64) {
        (
            self.origin_x + column as f64 * self.step_x,
            self.origin_y + row as f64 * self.step_y,
        )
    }

    /// Image width of one cell, in millimeters.
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Image height of one cell, in millimeters.
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }
}
