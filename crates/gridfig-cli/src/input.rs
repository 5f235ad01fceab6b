//! The JSON figure description read from disk.
//!
//! A description lists the figure's modules; each module names its image
//! files in a row-major grid, plus optional layout overrides, captions,
//! frames, crop markers and title content. Image files are probed for
//! their pixel dimensions here, so the library never re-reads them.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use gridfig::module::{CropMarker, Frame, ImageRef};
use gridfig::{CellData, ModuleData, ModuleInput, TitleOverride, color::Rgb};
use gridfig::geometry::Direction;

use crate::error::CliError;

/// Top-level figure description document.
#[derive(Debug, Deserialize)]
pub struct FigureDescription {
    pub modules: Vec<ModuleDescription>,
}

/// One module's description.
#[derive(Debug, Deserialize)]
pub struct ModuleDescription {
    /// Dotted-path layout overrides, e.g. `"padding.north": 1.0`.
    #[serde(default)]
    pub layout: Map<String, Value>,

    /// Row-major grid of image paths; an entry may be a list of paths
    /// for stacked images.
    pub images: Vec<Vec<ImageEntry>>,

    /// Per-edge caption grids, indexed like `images`.
    #[serde(default)]
    pub captions: CaptionGrids,

    /// A frame applied to every cell.
    #[serde(default)]
    pub frame: Option<Frame>,

    /// Crop markers attached to individual cells.
    #[serde(default)]
    pub crop_markers: Vec<PlacedCropMarker>,

    /// Figure-edge title texts.
    #[serde(default)]
    pub titles: EdgeTexts,

    /// Column title bar content and colors.
    #[serde(default)]
    pub column_titles: ColumnBars,

    /// Row title bar content and colors.
    #[serde(default)]
    pub row_titles: RowBars,
}

/// One image slot: a single path or an ordered stack of paths.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImageEntry {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

/// Caption strings per edge, each a row-major grid matching the images.
#[derive(Debug, Default, Deserialize)]
pub struct CaptionGrids {
    pub north: Option<Vec<Vec<String>>>,
    pub south: Option<Vec<Vec<String>>>,
    pub east: Option<Vec<Vec<String>>>,
    pub west: Option<Vec<Vec<String>>>,
}

/// A crop marker with its grid position.
#[derive(Debug, Deserialize)]
pub struct PlacedCropMarker {
    pub row: usize,
    pub column: usize,
    #[serde(flatten)]
    pub marker: CropMarker,
}

/// Figure-edge title texts.
#[derive(Debug, Default, Deserialize)]
pub struct EdgeTexts {
    pub north: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
    pub west: Option<String>,
}

/// Content and color overrides for one title bar.
#[derive(Debug, Default, Deserialize)]
pub struct BarDescription {
    pub text_color: Option<Rgb>,
    pub background_colors: Option<Vec<Rgb>>,
    pub content: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ColumnBars {
    pub north: Option<BarDescription>,
    pub south: Option<BarDescription>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RowBars {
    pub east: Option<BarDescription>,
    pub west: Option<BarDescription>,
}

/// Parses a figure description document.
pub fn parse_description(source: &str) -> Result<FigureDescription, CliError> {
    Ok(serde_json::from_str(source)?)
}

/// Turns a parsed description into library inputs, resolving image paths
/// relative to `base_dir` and probing each file for its dimensions.
pub fn into_inputs(
    description: FigureDescription,
    base_dir: &Path,
) -> Result<Vec<ModuleInput>, CliError> {
    description
        .modules
        .into_iter()
        .map(|module| module_input(module, base_dir))
        .collect()
}

fn module_input(description: ModuleDescription, base_dir: &Path) -> Result<ModuleInput, CliError> {
    let mut data = ModuleData::default();

    for (row, entries) in description.images.iter().enumerate() {
        let mut cells = Vec::with_capacity(entries.len());
        for (column, entry) in entries.iter().enumerate() {
            let mut cell = match entry {
                ImageEntry::One(path) => CellData::single(image_ref(base_dir, path)?),
                ImageEntry::Many(paths) => CellData::stacked(
                    paths
                        .iter()
                        .map(|path| image_ref(base_dir, path))
                        .collect::<Result<_, _>>()?,
                ),
            };

            for (direction, grid) in [
                (Direction::North, &description.captions.north),
                (Direction::South, &description.captions.south),
                (Direction::East, &description.captions.east),
                (Direction::West, &description.captions.west),
            ] {
                let caption = grid
                    .as_ref()
                    .and_then(|rows| rows.get(row))
                    .and_then(|cols| cols.get(column));
                if let Some(caption) = caption {
                    *cell.captions.get_mut(direction) = Some(caption.clone());
                }
            }

            cell.frame = description.frame;
            cells.push(cell);
        }
        data.elements.push(cells);
    }

    for placed in &description.crop_markers {
        let cell = data
            .elements
            .get_mut(placed.row)
            .and_then(|cells| cells.get_mut(placed.column))
            .ok_or(CliError::CropMarkerOutOfGrid {
                row: placed.row,
                column: placed.column,
            })?;
        cell.crop_marker = Some(placed.marker);
    }

    for (direction, text) in [
        (Direction::North, description.titles.north),
        (Direction::South, description.titles.south),
        (Direction::East, description.titles.east),
        (Direction::West, description.titles.west),
    ] {
        *data.titles.get_mut(direction) = text;
    }

    data.column_titles.north = title_override(description.column_titles.north);
    data.column_titles.south = title_override(description.column_titles.south);
    data.row_titles.east = title_override(description.row_titles.east);
    data.row_titles.west = title_override(description.row_titles.west);

    Ok(ModuleInput {
        layout: description.layout,
        data,
    })
}

fn title_override(bar: Option<BarDescription>) -> TitleOverride {
    let Some(bar) = bar else {
        return TitleOverride::default();
    };
    TitleOverride {
        text_color: bar.text_color,
        background_colors: bar.background_colors,
        content: bar.content,
    }
}

fn image_ref(base_dir: &Path, path: &Path) -> Result<ImageRef, CliError> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    let (px_width, px_height) =
        image::image_dimensions(&resolved).map_err(|source| CliError::Image {
            path: resolved.clone(),
            source,
        })?;
    debug!(
        path = resolved.display().to_string(),
        px_width = px_width,
        px_height = px_height;
        "probed image"
    );
    Ok(ImageRef::File {
        path: resolved,
        px_width,
        px_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_minimal_description() {
        let description = parse_description(
            r#"{ "modules": [ { "images": [["a.png", "b.png"]] } ] }"#,
        )
        .unwrap();
        assert_eq!(description.modules.len(), 1);
        assert_eq!(description.modules[0].images[0].len(), 2);
    }

    #[test]
    fn test_stacked_entry_parses_as_list() {
        let description = parse_description(
            r#"{ "modules": [ { "images": [[["base.png", "overlay.png"]]] } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            description.modules[0].images[0][0],
            ImageEntry::Many(ref paths) if paths.len() == 2
        ));
    }

    #[test]
    fn test_unknown_description_shape_is_rejected() {
        assert!(parse_description(r#"{ "modules": "nope" }"#).is_err());
    }

    #[test]
    fn test_out_of_grid_crop_marker_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]))
            .save(dir.path().join("a.png"))
            .unwrap();

        let description = parse_description(
            r#"{ "modules": [ {
                "images": [["a.png"]],
                "crop_markers": [ {
                    "row": 1, "column": 0,
                    "x": 0.1, "y": 0.1, "width": 0.2, "height": 0.2,
                    "line_width": 0.4, "color": [255, 0, 0]
                } ]
            } ] }"#,
        )
        .unwrap();

        let err = into_inputs(description, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::CropMarkerOutOfGrid { row: 1, column: 0 }
        ));
    }
}
