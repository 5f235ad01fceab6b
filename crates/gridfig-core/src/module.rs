//! The module data model.
//!
//! A module is one rectangular grid of images plus its decorations: padding,
//! per-cell caption slots, figure-edge titles and row/column title bars. A
//! figure composes one or more modules side by side at a shared height.
//!
//! # Overview
//!
//! - [`Module`] - a merged, render-ready module (grid + decorations + solved
//!   physical size)
//! - [`ModuleLayout`] - the decoration configuration deserialized from a
//!   layout document
//! - [`Cell`] - one grid cell: images, captions, optional frame and crop
//!   marker
//! - [`ImageSet`] / [`ImageRef`] / [`RasterImage`] - the cell image payload
//!
//! Physical sizes are millimeters throughout; pixel dimensions only enter
//! through the representative image that fixes a module's aspect ratio.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    color::Rgb,
    dimension::{self, DimensionError},
    geometry::{Direction, EastWest, Edges, NorthSouth, Size},
};

/// An in-memory RGB8 raster image, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    px_width: u32,
    px_height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wraps a raw RGB8 buffer. The buffer length must be
    /// `px_width * px_height * 3`; a mismatched buffer is rejected when the
    /// image is materialized to disk, not here.
    pub fn new(px_width: u32, px_height: u32, data: Vec<u8>) -> Self {
        Self {
            px_width,
            px_height,
            data,
        }
    }

    /// Creates a solid-color image, mostly useful in tests and demos.
    pub fn filled(px_width: u32, px_height: u32, color: Rgb) -> Self {
        let (r, g, b) = color.channels();
        let data = [r, g, b].repeat((px_width * px_height) as usize);
        Self::new(px_width, px_height, data)
    }

    /// Returns the pixel width.
    pub fn px_width(&self) -> u32 {
        self.px_width
    }

    /// Returns the pixel height.
    pub fn px_height(&self) -> u32 {
        self.px_height
    }

    /// Returns the raw pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning `(px_width, px_height, buffer)`.
    pub fn into_parts(self) -> (u32, u32, Vec<u8>) {
        (self.px_width, self.px_height, self.data)
    }
}

/// A reference to one cell image: either a raw in-memory buffer awaiting
/// materialization, or an already produced file on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    /// Raw pixel data; materialization rewrites this to [`ImageRef::File`].
    Raw(RasterImage),
    /// An image file, with its pixel dimensions kept for aspect sizing.
    File {
        path: PathBuf,
        px_width: u32,
        px_height: u32,
    },
}

impl ImageRef {
    /// Returns the pixel dimensions as `(width, height)`.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        match self {
            Self::Raw(image) => (image.px_width(), image.px_height()),
            Self::File {
                px_width,
                px_height,
                ..
            } => (*px_width, *px_height),
        }
    }

    /// Returns the file path if this reference has been materialized.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Raw(_) => None,
            Self::File { path, .. } => Some(path.as_path()),
        }
    }
}

/// The image payload of one cell.
///
/// A cell holds either a single image or an ordered stack of images
/// overlaid on top of each other. The variant is fixed at normalization
/// time; downstream code never probes for one shape or the other.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSet {
    Single(ImageRef),
    Multi(Vec<ImageRef>),
}

impl ImageSet {
    /// Views the payload as a slice, regardless of variant.
    pub fn as_slice(&self) -> &[ImageRef] {
        match self {
            Self::Single(image) => std::slice::from_ref(image),
            Self::Multi(images) => images,
        }
    }

    /// Mutable slice view over the payload.
    pub fn as_mut_slice(&mut self) -> &mut [ImageRef] {
        match self {
            Self::Single(image) => std::slice::from_mut(image),
            Self::Multi(images) => images,
        }
    }

    /// The representative image: the single image, or the first of a stack.
    pub fn first(&self) -> Option<&ImageRef> {
        self.as_slice().first()
    }

    /// Returns true for the stacked variant.
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

/// A frame drawn around a cell's image area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Stroke width in points.
    pub line_width: f64,
    pub color: Rgb,
}

/// A crop marker: a rectangle drawn over a region of the image, given in
/// relative image coordinates (`0.0..=1.0` on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropMarker {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stroke width in points.
    pub line_width: f64,
    pub color: Rgb,
}

/// One grid cell: an image payload plus optional per-edge captions, an
/// optional frame and an optional crop marker.
///
/// Absent optional fields mean "not drawn": an empty caption, no frame, no
/// marker. That fallback is a contract, not a best-effort guess.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    images: ImageSet,
    captions: Edges<String>,
    frame: Option<Frame>,
    crop_marker: Option<CropMarker>,
}

impl Cell {
    /// Creates a cell with the given image payload and no decorations.
    pub fn new(images: ImageSet) -> Self {
        Self {
            images,
            captions: Edges::default(),
            frame: None,
            crop_marker: None,
        }
    }

    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageSet {
        &mut self.images
    }

    /// Returns the caption on the given edge; empty when unset.
    pub fn caption(&self, direction: Direction) -> &str {
        self.captions.get(direction)
    }

    pub fn set_caption(&mut self, direction: Direction, caption: impl Into<String>) {
        *self.captions.get_mut(direction) = caption.into();
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = Some(frame);
    }

    pub fn crop_marker(&self) -> Option<&CropMarker> {
        self.crop_marker.as_ref()
    }

    pub fn set_crop_marker(&mut self, marker: CropMarker) {
        self.crop_marker = Some(marker);
    }
}

/// Spacing between neighboring grid cells, in millimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

/// A per-cell caption slot on one edge of every image.
///
/// A slot with `size == 0.0` is inactive and contributes nothing to the
/// fixed decoration budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionSlot {
    /// Slot extent perpendicular to the edge (height for north/south
    /// captions, width for east/west), in millimeters.
    pub size: f64,
    /// Gap between the slot and the image, in millimeters.
    pub offset: f64,
    /// Caption font size in points.
    pub font_size: f64,
}

impl CaptionSlot {
    /// The fixed millimeters this slot adds on its edge, zero when inactive.
    pub fn extent(&self) -> f64 {
        if self.size > 0.0 {
            self.size + self.offset
        } else {
            0.0
        }
    }
}

/// A figure-edge title: one string spanning a whole module edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeTitle {
    /// Bar extent perpendicular to the edge, in millimeters.
    pub size: f64,
    /// Gap between the bar and the module body, in millimeters.
    pub offset: f64,
    /// Title font size in points.
    pub font_size: f64,
    pub text_color: Rgb,
    pub background_color: Option<Rgb>,
    #[serde(default)]
    pub content: String,
}

impl EdgeTitle {
    /// The fixed millimeters this title adds on its edge, zero when inactive.
    pub fn extent(&self) -> f64 {
        if self.size > 0.0 {
            self.size + self.offset
        } else {
            0.0
        }
    }
}

/// A row or column title bar: one entry per row (east/west bars) or per
/// column (north/south bars), each with its own background color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleBar {
    /// Bar extent perpendicular to the edge, in millimeters.
    pub size: f64,
    /// Gap between the bar and the grid, in millimeters.
    pub offset: f64,
    /// Bar font size in points.
    pub font_size: f64,
    pub text_color: Rgb,
    pub background_colors: Vec<Rgb>,
    #[serde(default)]
    pub content: Vec<String>,
}

impl TitleBar {
    /// The fixed millimeters this bar adds on its edge, zero when inactive.
    pub fn extent(&self) -> f64 {
        if self.size > 0.0 {
            self.size + self.offset
        } else {
            0.0
        }
    }

    /// Background color for the entry at `index`. A single configured color
    /// applies to every entry; an empty list falls back to white.
    pub fn background_for(&self, index: usize) -> Rgb {
        match self.background_colors.len() {
            0 => Rgb::white(),
            len => self.background_colors[index.min(len - 1)],
        }
    }
}

/// The decoration configuration of one module, deserialized from a layout
/// document (built-in defaults merged with the user's dotted-path
/// overrides).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModuleLayout {
    padding: Edges<f64>,
    spacing: Spacing,
    captions: Edges<CaptionSlot>,
    titles: Edges<EdgeTitle>,
    column_titles: NorthSouth<TitleBar>,
    row_titles: EastWest<TitleBar>,
}

impl ModuleLayout {
    pub fn padding(&self) -> &Edges<f64> {
        &self.padding
    }

    pub fn padding_mut(&mut self) -> &mut Edges<f64> {
        &mut self.padding
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn spacing_mut(&mut self) -> &mut Spacing {
        &mut self.spacing
    }

    pub fn captions(&self) -> &Edges<CaptionSlot> {
        &self.captions
    }

    pub fn captions_mut(&mut self) -> &mut Edges<CaptionSlot> {
        &mut self.captions
    }

    pub fn titles(&self) -> &Edges<EdgeTitle> {
        &self.titles
    }

    pub fn titles_mut(&mut self) -> &mut Edges<EdgeTitle> {
        &mut self.titles
    }

    pub fn column_titles(&self) -> &NorthSouth<TitleBar> {
        &self.column_titles
    }

    pub fn column_titles_mut(&mut self) -> &mut NorthSouth<TitleBar> {
        &mut self.column_titles
    }

    pub fn row_titles(&self) -> &EastWest<TitleBar> {
        &self.row_titles
    }

    pub fn row_titles_mut(&mut self) -> &mut EastWest<TitleBar> {
        &mut self.row_titles
    }
}

/// A merged, render-ready module.
///
/// Constructed by the normalizer from a [`ModuleLayout`] and user data,
/// sized by the alignment solver, consumed by a rendering backend, then
/// discarded. `total_width` and `total_height` are zero until the solver
/// assigns them; after solving both are strictly positive and satisfy the
/// aspect-ratio invariant (see [`crate::dimension`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    layout: ModuleLayout,
    elements: Vec<Vec<Cell>>,
    num_rows: usize,
    num_columns: usize,
    px_width: u32,
    px_height: u32,
    total_width: f64,
    total_height: f64,
}

impl Module {
    /// Creates an unsized module from its layout, cell grid and the pixel
    /// dimensions of the representative (first) image.
    ///
    /// The grid must be rectangular and non-empty; the normalizer in
    /// `gridfig-merge` validates that before construction.
    pub fn new(
        layout: ModuleLayout,
        elements: Vec<Vec<Cell>>,
        px_width: u32,
        px_height: u32,
    ) -> Self {
        let num_rows = elements.len();
        let num_columns = elements.first().map_or(0, Vec::len);
        Self {
            layout,
            elements,
            num_rows,
            num_columns,
            px_width,
            px_height,
            total_width: 0.0,
            total_height: 0.0,
        }
    }

    pub fn layout(&self) -> &ModuleLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ModuleLayout {
        &mut self.layout
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Pixel width of the representative image.
    pub fn px_width(&self) -> u32 {
        self.px_width
    }

    /// Pixel height of the representative image.
    pub fn px_height(&self) -> u32 {
        self.px_height
    }

    /// Solved total width in millimeters; zero before solving.
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Solved total height in millimeters; zero before solving.
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Solved size as a [`Size`].
    pub fn total_size(&self) -> Size {
        Size::new(self.total_width, self.total_height)
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        &self.elements[row][column]
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.elements
    }

    /// Iterates over all cells with their `(row, column)` position.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut Cell)> {
        self.elements.iter_mut().enumerate().flat_map(|(row, cells)| {
            cells
                .iter_mut()
                .enumerate()
                .map(move |(column, cell)| ((row, column), cell))
        })
    }

    /// The module aspect ratio `a`: image-area height divided by image-area
    /// width, `num_rows / num_columns * px_height / px_width`.
    pub fn aspect_ratio(&self) -> f64 {
        dimension::aspect_ratio(self)
    }

    /// Sets `total_width` and derives `total_height` so the aspect-ratio
    /// invariant holds.
    ///
    /// # Errors
    ///
    /// [`DimensionError::InvalidLayout`] when the fixed decorations alone
    /// exceed the requested width.
    pub fn resize_to_match_total_width(
        &mut self,
        total_width: f64,
    ) -> Result<(), DimensionError> {
        let size = dimension::size_for_total_width(self, total_width)?;
        self.set_total_size(size);
        Ok(())
    }

    /// Sets `total_height` and derives `total_width`; the symmetric
    /// operation of [`Module::resize_to_match_total_width`].
    pub fn resize_to_match_total_height(
        &mut self,
        total_height: f64,
    ) -> Result<(), DimensionError> {
        let size = dimension::size_for_total_height(self, total_height)?;
        self.set_total_size(size);
        Ok(())
    }

    fn set_total_size(&mut self, size: Size) {
        self.total_width = size.width();
        self.total_height = size.height();
    }
}
