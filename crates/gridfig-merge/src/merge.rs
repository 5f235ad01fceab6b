//! The module normalizer.
//!
//! Takes one module's merged layout plus the user's data (images, captions,
//! title content) and produces a render-ready [`Module`]: grid shape
//! validated, the representative image's pixel dimensions recorded, absent
//! optional fields replaced by their documented defaults. Physical sizing
//! is left to the alignment solver.

use log::debug;

use gridfig_core::{
    geometry::{Direction, EastWest, Edges, NorthSouth},
    module::{Cell, CropMarker, Frame, ImageRef, ImageSet, Module, ModuleLayout, TitleBar},
};

use crate::MergeError;

/// User-supplied content for one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub images: ImageSet,
    /// Captions per edge; `None` falls back to an empty caption.
    pub captions: Edges<Option<String>>,
    pub frame: Option<Frame>,
    pub crop_marker: Option<CropMarker>,
}

impl CellData {
    /// A cell holding one image and no decorations.
    pub fn single(image: ImageRef) -> Self {
        Self::with_images(ImageSet::Single(image))
    }

    /// A cell overlaying an ordered stack of images.
    pub fn stacked(images: Vec<ImageRef>) -> Self {
        Self::with_images(ImageSet::Multi(images))
    }

    fn with_images(images: ImageSet) -> Self {
        Self {
            images,
            captions: Edges::default(),
            frame: None,
            crop_marker: None,
        }
    }
}

/// User-supplied overrides for one row or column title bar.
///
/// `None` fields keep the layout document's value; absent content defaults
/// to one empty string per row/column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleOverride {
    pub text_color: Option<gridfig_core::color::Rgb>,
    pub background_colors: Option<Vec<gridfig_core::color::Rgb>>,
    pub content: Option<Vec<String>>,
}

/// The user's data for one module: the cell grid plus title content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleData {
    /// Row-major grid of cells; must be rectangular and non-empty.
    pub elements: Vec<Vec<CellData>>,
    pub column_titles: NorthSouth<TitleOverride>,
    pub row_titles: EastWest<TitleOverride>,
    /// Figure-edge title strings; `None` keeps the layout document's value.
    pub titles: Edges<Option<String>>,
}

/// Builds a render-ready [`Module`] from a merged layout and user data.
///
/// The representative image is the first cell's first image; its pixel
/// dimensions fix the module aspect ratio.
///
/// # Errors
///
/// - [`MergeError::EmptyGrid`] when the grid has zero rows or columns.
/// - [`MergeError::RaggedGrid`] when rows differ in length.
/// - [`MergeError::MissingFirstImage`] when the first cell has no image.
pub fn merge_module(layout: ModuleLayout, data: ModuleData) -> Result<Module, MergeError> {
    let num_rows = data.elements.len();
    let num_columns = data.elements.first().map_or(0, Vec::len);
    if num_rows == 0 || num_columns == 0 {
        return Err(MergeError::EmptyGrid);
    }
    for (row, cells) in data.elements.iter().enumerate() {
        if cells.len() != num_columns {
            return Err(MergeError::RaggedGrid {
                row,
                found: cells.len(),
                expected: num_columns,
            });
        }
    }

    let first = data.elements[0][0]
        .images
        .first()
        .ok_or(MergeError::MissingFirstImage)?;
    let (px_width, px_height) = first.pixel_dimensions();
    if px_width == 0 || px_height == 0 {
        return Err(MergeError::MissingFirstImage);
    }

    let mut layout = layout;

    for direction in Direction::ALL {
        if let Some(content) = data.titles.get(direction) {
            layout.titles_mut().get_mut(direction).content = content.clone();
        }
    }

    apply_bar_override(
        &mut layout.column_titles_mut().north,
        &data.column_titles.north,
        num_columns,
    );
    apply_bar_override(
        &mut layout.column_titles_mut().south,
        &data.column_titles.south,
        num_columns,
    );
    apply_bar_override(&mut layout.row_titles_mut().east, &data.row_titles.east, num_rows);
    apply_bar_override(&mut layout.row_titles_mut().west, &data.row_titles.west, num_rows);

    let elements = data
        .elements
        .into_iter()
        .map(|cells| cells.into_iter().map(merge_cell).collect())
        .collect();

    debug!(
        num_rows = num_rows,
        num_columns = num_columns,
        px_width = px_width,
        px_height = px_height;
        "Module normalized"
    );

    Ok(Module::new(layout, elements, px_width, px_height))
}

fn merge_cell(data: CellData) -> Cell {
    let mut cell = Cell::new(data.images);
    for direction in Direction::ALL {
        if let Some(caption) = data.captions.get(direction) {
            cell.set_caption(direction, caption.clone());
        }
    }
    if let Some(frame) = data.frame {
        cell.set_frame(frame);
    }
    if let Some(marker) = data.crop_marker {
        cell.set_crop_marker(marker);
    }
    cell
}

/// Applies one title-bar override and pads the bar's content to one entry
/// per row/column.
fn apply_bar_override(bar: &mut TitleBar, data: &TitleOverride, count: usize) {
    if let Some(color) = data.text_color {
        bar.text_color = color;
    }
    if let Some(colors) = &data.background_colors {
        bar.background_colors = colors.clone();
    }
    if let Some(content) = &data.content {
        bar.content = content.clone();
    }
    bar.content.resize(count, String::new());
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use gridfig_core::{color::Rgb, module::RasterImage};

    use super::*;

    fn raw_image(px_width: u32, px_height: u32) -> ImageRef {
        ImageRef::Raw(RasterImage::filled(px_width, px_height, Rgb::white()))
    }

    fn grid(rows: usize, columns: usize) -> Vec<Vec<CellData>> {
        (0..rows)
            .map(|_| (0..columns).map(|_| CellData::single(raw_image(320, 240))).collect())
            .collect()
    }

    #[test]
    fn test_merge_records_grid_shape_and_pixels() {
        let data = ModuleData {
            elements: grid(2, 3),
            ..ModuleData::default()
        };
        let module = merge_module(ModuleLayout::default(), data).unwrap();

        assert_eq!(module.num_rows(), 2);
        assert_eq!(module.num_columns(), 3);
        assert_eq!(module.px_width(), 320);
        assert_eq!(module.px_height(), 240);
        // Sizing is the solver's job.
        assert_approx_eq!(f64, module.total_width(), 0.0);
        assert_approx_eq!(f64, module.total_height(), 0.0);
    }

    #[test]
    fn test_merge_rejects_empty_grid() {
        let data = ModuleData::default();
        assert!(matches!(
            merge_module(ModuleLayout::default(), data),
            Err(MergeError::EmptyGrid)
        ));

        let data = ModuleData {
            elements: vec![Vec::new()],
            ..ModuleData::default()
        };
        assert!(matches!(
            merge_module(ModuleLayout::default(), data),
            Err(MergeError::EmptyGrid)
        ));
    }

    #[test]
    fn test_merge_rejects_ragged_grid() {
        let mut elements = grid(2, 2);
        elements[1].pop();
        let data = ModuleData {
            elements,
            ..ModuleData::default()
        };
        assert!(matches!(
            merge_module(ModuleLayout::default(), data),
            Err(MergeError::RaggedGrid {
                row: 1,
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_merge_rejects_missing_first_image() {
        let mut elements = grid(1, 2);
        elements[0][0] = CellData::stacked(Vec::new());
        let data = ModuleData {
            elements,
            ..ModuleData::default()
        };
        assert!(matches!(
            merge_module(ModuleLayout::default(), data),
            Err(MergeError::MissingFirstImage)
        ));
    }

    #[test]
    fn test_merge_multi_cell_uses_first_image() {
        let mut elements = grid(1, 1);
        elements[0][0] = CellData::stacked(vec![raw_image(640, 480), raw_image(10, 10)]);
        let data = ModuleData {
            elements,
            ..ModuleData::default()
        };
        let module = merge_module(ModuleLayout::default(), data).unwrap();
        assert_eq!((module.px_width(), module.px_height()), (640, 480));
    }

    #[test]
    fn test_merge_copies_cell_decorations() {
        let mut elements = grid(1, 1);
        *elements[0][0].captions.get_mut(Direction::South) = Some("a) input".to_string());
        elements[0][0].frame = Some(Frame {
            line_width: 0.6,
            color: Rgb::new(255, 0, 0),
        });
        let data = ModuleData {
            elements,
            ..ModuleData::default()
        };

        let module = merge_module(ModuleLayout::default(), data).unwrap();
        let cell = module.cell(0, 0);
        assert_eq!(cell.caption(Direction::South), "a) input");
        assert_eq!(cell.caption(Direction::North), "");
        assert_eq!(cell.frame().unwrap().color, Rgb::new(255, 0, 0));
        assert!(cell.crop_marker().is_none());
    }

    #[test]
    fn test_merge_defaults_title_content_per_row_and_column() {
        let data = ModuleData {
            elements: grid(2, 3),
            ..ModuleData::default()
        };
        let module = merge_module(ModuleLayout::default(), data).unwrap();

        assert_eq!(module.layout().column_titles().north.content.len(), 3);
        assert_eq!(module.layout().row_titles().west.content.len(), 2);
        assert!(module.layout().row_titles().west.content.iter().all(String::is_empty));
    }

    #[test]
    fn test_merge_applies_title_overrides() {
        let mut data = ModuleData {
            elements: grid(2, 2),
            ..ModuleData::default()
        };
        data.row_titles.east = TitleOverride {
            text_color: Some(Rgb::new(255, 255, 255)),
            background_colors: Some(vec![Rgb::new(10, 20, 30)]),
            content: Some(vec!["Ours".to_string(), "Reference".to_string()]),
        };
        *data.titles.get_mut(Direction::North) = Some("Comparison".to_string());

        let module = merge_module(ModuleLayout::default(), data).unwrap();
        let east = &module.layout().row_titles().east;
        assert_eq!(east.content, vec!["Ours", "Reference"]);
        assert_eq!(east.text_color, Rgb::new(255, 255, 255));
        assert_eq!(east.background_for(0), Rgb::new(10, 20, 30));
        assert_eq!(east.background_for(5), Rgb::new(10, 20, 30));
        assert_eq!(
            module.layout().titles().get(Direction::North).content,
            "Comparison"
        );
    }

    #[test]
    fn test_merge_pads_short_title_content() {
        let mut data = ModuleData {
            elements: grid(3, 1),
            ..ModuleData::default()
        };
        data.row_titles.west.content = Some(vec!["only one".to_string()]);

        let module = merge_module(ModuleLayout::default(), data).unwrap();
        let content = &module.layout().row_titles().west.content;
        assert_eq!(content.len(), 3);
        assert_eq!(content[0], "only one");
        assert_eq!(content[2], "");
    }
}
