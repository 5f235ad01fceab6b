//! Layout-document merging and module normalization for gridfig.
//!
//! This crate turns user input into render-ready modules in two steps:
//!
//! 1. **Layout merging**: dotted-path overrides (e.g.
//!    `"row_titles.east.text_color"`) are applied over the built-in
//!    default layout document ([`defaults`], [`apply_overrides`]), and the
//!    result deserializes into a typed
//!    [`ModuleLayout`](gridfig_core::module::ModuleLayout).
//! 2. **Normalization**: the user's images, captions and title content
//!    are merged into the layout ([`merge_module`]), validating the grid
//!    and recording the representative image's pixel dimensions.

pub mod defaults;

mod error;
mod merge;
mod overrides;

pub use error::MergeError;
pub use merge::{CellData, ModuleData, TitleOverride, merge_module};
pub use overrides::{apply_overrides, set_path};

use serde_json::{Map, Value};

use gridfig_core::module::ModuleLayout;

/// Builds a [`ModuleLayout`] from the default document plus the user's
/// dotted-path overrides.
///
/// # Errors
///
/// [`MergeError::UnknownKey`] for overrides naming unknown options,
/// [`MergeError::Document`] when the merged document does not deserialize.
pub fn load_layout(overrides: &Map<String, Value>) -> Result<ModuleLayout, MergeError> {
    let mut document = defaults::default_layout();
    apply_overrides(&mut document, overrides)?;
    Ok(serde_json::from_value(document)?)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_load_layout_without_overrides() {
        let layout = load_layout(&Map::new()).unwrap();
        assert_approx_eq!(f64, layout.spacing().horizontal, 0.8);
    }

    #[test]
    fn test_load_layout_with_overrides() {
        let mut overrides = Map::new();
        overrides.insert("row_titles.west.size".to_string(), json!(4.0));
        overrides.insert("row_titles.west.content".to_string(), json!(["x", "y"]));

        let layout = load_layout(&overrides).unwrap();
        assert_approx_eq!(f64, layout.row_titles().west.size, 4.0);
        assert_eq!(layout.row_titles().west.content, vec!["x", "y"]);
        // Untouched defaults survive.
        assert_approx_eq!(f64, layout.row_titles().east.size, 0.0);
    }

    #[test]
    fn test_load_layout_rejects_unknown_option() {
        let mut overrides = Map::new();
        overrides.insert("row_titles.west.font".to_string(), json!(12));
        assert!(matches!(
            load_layout(&overrides),
            Err(MergeError::UnknownKey { .. })
        ));
    }
}
