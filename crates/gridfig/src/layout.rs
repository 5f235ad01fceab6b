//! Aligns a sequence of modules to one common height filling a target
//! combined width.
//!
//! Every module enters unsized (total width and height zero) and leaves
//! with both totals set. For a single module the target width applies
//! directly; for two or more, one common height is solved so the summed
//! total widths hit the target exactly.

use log::{debug, warn};

use gridfig_core::dimension::{self, body_widths_for_equal_heights};
use gridfig_core::module::Module;

use crate::error::FigureError;

/// Tolerance below which two solved heights count as equal, in
/// millimeters.
const HEIGHT_TOLERANCE_MM: f64 = 1e-6;

/// Result of a two-module alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairAlignment {
    /// Absolute difference between the two solved total heights. Nonzero
    /// values beyond rounding indicate inconsistent decoration budgets.
    pub height_mismatch: f64,
}

/// Sizes every module so the summed total widths equal `combined_width`
/// and all modules share one total height.
///
/// With a single module the width is applied directly and the height
/// follows from its aspect ratio. With `N >= 2` modules the common
/// total height `H` solves
///
/// ```text
/// sum_i (H * inv_i + min_width_i - min_height_i * inv_i) = combined_width
/// ```
///
/// where `inv_i` is the inverse aspect ratio of module `i`; each module
/// is then resized to `H`.
///
/// # Errors
///
/// - [`FigureError::EmptyFigure`] when `modules` is empty.
/// - [`FigureError::NonPositiveHeight`] when the solved common height is
///   not positive, meaning the fixed decorations alone exceed the target
///   width.
/// - [`FigureError::Layout`] when an individual module's decorations do
///   not fit the height assigned to it.
pub fn align_modules(modules: &mut [Module], combined_width: f64) -> Result<(), FigureError> {
    match modules {
        [] => Err(FigureError::EmptyFigure),
        [module] => {
            module.resize_to_match_total_width(combined_width)?;
            Ok(())
        }
        _ => {
            let mut inverse_sum = 0.0;
            let mut fixed_sum = 0.0;
            for module in modules.iter() {
                let inverse = 1.0 / module.aspect_ratio();
                inverse_sum += inverse;
                fixed_sum += dimension::min_width(module) - dimension::min_height(module) * inverse;
            }

            let height = (combined_width - fixed_sum) / inverse_sum;
            if height <= 0.0 {
                return Err(FigureError::NonPositiveHeight {
                    height,
                    width: combined_width,
                });
            }
            debug!(height = height, modules = modules.len(); "solved common height");

            for module in modules.iter_mut() {
                module.resize_to_match_total_height(height)?;
            }
            Ok(())
        }
    }
}

/// Aligns exactly two modules through the body-width split of
/// [`body_widths_for_equal_heights`].
///
/// Produces the same sizes as [`align_modules`] on two modules; kept as
/// a separate path because it reports the residual height mismatch
/// instead of silently absorbing it.
pub fn align_pair(
    first: &mut Module,
    second: &mut Module,
    combined_width: f64,
) -> Result<PairAlignment, FigureError> {
    let (body_first, body_second) = body_widths_for_equal_heights(first, second, combined_width)?;

    first.resize_to_match_total_width(body_first + dimension::min_width(first))?;
    second.resize_to_match_total_width(body_second + dimension::min_width(second))?;

    let height_mismatch = (first.total_height() - second.total_height()).abs();
    if height_mismatch > HEIGHT_TOLERANCE_MM {
        warn!(mismatch = height_mismatch; "aligned modules differ in height");
    }
    Ok(PairAlignment { height_mismatch })
}
