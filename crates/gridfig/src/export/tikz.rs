//! TikZ backend: renders a solved module into a `tikzpicture` fragment.
//!
//! Coordinates use `x=1mm, y=-1mm`, so the picture's y axis grows
//! downward and matches the module-local millimeter frame of
//! [`GridFrame`].

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::debug;

use gridfig_core::color::Rgb;
use gridfig_core::dimension::GridFrame;
use gridfig_core::geometry::Direction;
use gridfig_core::module::{Cell, Module, TitleBar};

use super::{ExportError, Generator};

/// Renders modules as standalone `tikzpicture` environments.
pub struct TikzGenerator;

impl Generator for TikzGenerator {
    fn fragment_extension(&self) -> &'static str {
        "tex"
    }

    fn document_prologue(&self) -> &'static str {
        "\\documentclass{standalone}\n\\usepackage{tikz}\n\\usepackage{graphicx}\n\\begin{document}\n"
    }

    fn document_epilogue(&self) -> &'static str {
        "\\end{document}\n"
    }

    fn generate(&self, module: &Module, dir: &Path, stem: &str) -> Result<(), ExportError> {
        let fragment = render_module(module)?;
        let path = dir.join(format!("{stem}.{}", self.fragment_extension()));
        debug!(path = path.display().to_string(); "writing tikz fragment");
        fs::write(path, fragment)?;
        Ok(())
    }
}

fn render_module(module: &Module) -> Result<String, ExportError> {
    let frame = GridFrame::of(module);
    let width = module.total_width();
    let height = module.total_height();

    let mut out = String::new();
    writeln!(out, "\\begin{{tikzpicture}}[x=1mm, y=-1mm]")?;
    writeln!(
        out,
        "\\path[use as bounding box] (0, 0) rectangle ({}, {});",
        fmt_mm(width),
        fmt_mm(height)
    )?;

    for (row, cells) in module.rows().iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            render_cell(&mut out, module, &frame, cell, row, column)?;
        }
    }

    render_title_bars(&mut out, module, &frame)?;
    render_edge_titles(&mut out, module)?;

    writeln!(out, "\\end{{tikzpicture}}")?;
    Ok(out)
}

fn render_cell(
    out: &mut String,
    module: &Module,
    frame: &GridFrame,
    cell: &Cell,
    row: usize,
    column: usize,
) -> Result<(), ExportError> {
    let (x, y) = frame.cell_origin(row, column);
    let cw = frame.cell_width();
    let ch = frame.cell_height();

    // Stacked images draw in order, later entries on top.
    for image in cell.images().as_slice() {
        let path = image
            .path()
            .ok_or(ExportError::UnmaterializedImage { row, column })?;
        writeln!(
            out,
            "\\node[anchor=north west, inner sep=0] at ({}, {}) \
             {{\\includegraphics[width={}mm, height={}mm]{{{}}}}};",
            fmt_mm(x),
            fmt_mm(y),
            fmt_mm(cw),
            fmt_mm(ch),
            path.display()
        )?;
    }

    if let Some(outline) = cell.frame() {
        writeln!(
            out,
            "\\draw[color={}, line width={}pt] ({}, {}) rectangle ({}, {});",
            tikz_color(outline.color),
            fmt_mm(outline.line_width),
            fmt_mm(x),
            fmt_mm(y),
            fmt_mm(x + cw),
            fmt_mm(y + ch)
        )?;
    }

    if let Some(marker) = cell.crop_marker() {
        // Marker coordinates are relative to the image area.
        writeln!(
            out,
            "\\draw[color={}, line width={}pt] ({}, {}) rectangle ({}, {});",
            tikz_color(marker.color),
            fmt_mm(marker.line_width),
            fmt_mm(x + marker.x * cw),
            fmt_mm(y + marker.y * ch),
            fmt_mm(x + (marker.x + marker.width) * cw),
            fmt_mm(y + (marker.y + marker.height) * ch)
        )?;
    }

    render_captions(out, module, cell, x, y, cw, ch)?;
    Ok(())
}

fn render_captions(
    out: &mut String,
    module: &Module,
    cell: &Cell,
    x: f64,
    y: f64,
    cw: f64,
    ch: f64,
) -> Result<(), ExportError> {
    let captions = module.layout().captions();
    for direction in Direction::ALL {
        let slot = captions.get(direction);
        let text = cell.caption(direction);
        if slot.size <= 0.0 || text.is_empty() {
            continue;
        }
        // Center of the caption slot on this edge.
        let (cx, cy) = match direction {
            Direction::North => (x + cw / 2.0, y - slot.offset - slot.size / 2.0),
            Direction::South => (x + cw / 2.0, y + ch + slot.offset + slot.size / 2.0),
            Direction::West => (x - slot.offset - slot.size / 2.0, y + ch / 2.0),
            Direction::East => (x + cw + slot.offset + slot.size / 2.0, y + ch / 2.0),
        };
        writeln!(
            out,
            "\\node[anchor=center, font={}] at ({}, {}) {{{}}};",
            tikz_font(slot.font_size),
            fmt_mm(cx),
            fmt_mm(cy),
            escape_tex(text)
        )?;
    }
    Ok(())
}

fn render_title_bars(
    out: &mut String,
    module: &Module,
    frame: &GridFrame,
) -> Result<(), ExportError> {
    let layout = module.layout();
    let captions = layout.captions();
    let cw = frame.cell_width();
    let ch = frame.cell_height();

    let north = &layout.column_titles().north;
    if north.size > 0.0 {
        for column in 0..module.num_columns() {
            let (x, y) = frame.cell_origin(0, column);
            let top = y - captions.get(Direction::North).extent() - north.extent();
            render_bar_entry(out, north, column, x, top, cw, north.size, false)?;
        }
    }

    let south = &layout.column_titles().south;
    if south.size > 0.0 {
        for column in 0..module.num_columns() {
            let (x, y) = frame.cell_origin(module.num_rows() - 1, column);
            let top = y + ch + captions.get(Direction::South).extent() + south.offset;
            render_bar_entry(out, south, column, x, top, cw, south.size, false)?;
        }
    }

    let west = &layout.row_titles().west;
    if west.size > 0.0 {
        for row in 0..module.num_rows() {
            let (x, y) = frame.cell_origin(row, 0);
            let left = x - captions.get(Direction::West).extent() - west.extent();
            render_bar_entry(out, west, row, left, y, west.size, ch, true)?;
        }
    }

    let east = &layout.row_titles().east;
    if east.size > 0.0 {
        for row in 0..module.num_rows() {
            let (x, y) = frame.cell_origin(row, module.num_columns() - 1);
            let left = x + cw + captions.get(Direction::East).extent() + east.offset;
            render_bar_entry(out, east, row, left, y, east.size, ch, true)?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_bar_entry(
    out: &mut String,
    bar: &TitleBar,
    index: usize,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotated: bool,
) -> Result<(), ExportError> {
    writeln!(
        out,
        "\\fill[color={}] ({}, {}) rectangle ({}, {});",
        tikz_color(bar.background_for(index)),
        fmt_mm(x),
        fmt_mm(y),
        fmt_mm(x + width),
        fmt_mm(y + height)
    )?;

    let Some(text) = bar.content.get(index) else {
        return Ok(());
    };
    if text.is_empty() {
        return Ok(());
    }
    let rotate = if rotated { ", rotate=90" } else { "" };
    writeln!(
        out,
        "\\node[anchor=center, font={}, text={}{}] at ({}, {}) {{{}}};",
        tikz_font(bar.font_size),
        tikz_color(bar.text_color),
        rotate,
        fmt_mm(x + width / 2.0),
        fmt_mm(y + height / 2.0),
        escape_tex(text)
    )?;
    Ok(())
}

fn render_edge_titles(out: &mut String, module: &Module) -> Result<(), ExportError> {
    let layout = module.layout();
    let padding = layout.padding();
    let width = module.total_width();
    let height = module.total_height();

    for direction in Direction::ALL {
        let title = layout.titles().get(direction);
        if title.size <= 0.0 {
            continue;
        }
        // Edge titles span the whole module edge inside the padding.
        let (x, y, w, h, rotated) = match direction {
            Direction::North => (
                *padding.get(Direction::West),
                *padding.get(Direction::North),
                width - padding.horizontal_sum(),
                title.size,
                false,
            ),
            Direction::South => (
                *padding.get(Direction::West),
                height - padding.get(Direction::South) - title.size,
                width - padding.horizontal_sum(),
                title.size,
                false,
            ),
            Direction::West => (
                *padding.get(Direction::West),
                *padding.get(Direction::North),
                title.size,
                height - padding.vertical_sum(),
                true,
            ),
            Direction::East => (
                width - padding.get(Direction::East) - title.size,
                *padding.get(Direction::North),
                title.size,
                height - padding.vertical_sum(),
                true,
            ),
        };

        if let Some(background) = title.background_color {
            writeln!(
                out,
                "\\fill[color={}] ({}, {}) rectangle ({}, {});",
                tikz_color(background),
                fmt_mm(x),
                fmt_mm(y),
                fmt_mm(x + w),
                fmt_mm(y + h)
            )?;
        }
        if title.content.is_empty() {
            continue;
        }
        let rotate = if rotated { ", rotate=90" } else { "" };
        writeln!(
            out,
            "\\node[anchor=center, font={}, text={}{}] at ({}, {}) {{{}}};",
            tikz_font(title.font_size),
            tikz_color(title.text_color),
            rotate,
            fmt_mm(x + w / 2.0),
            fmt_mm(y + h / 2.0),
            escape_tex(&title.content)
        )?;
    }
    Ok(())
}

/// Millimeter value with fixed precision, keeping fragments diffable.
fn fmt_mm(value: f64) -> String {
    format!("{value:.3}")
}

fn tikz_color(color: Rgb) -> String {
    let (red, green, blue) = color.channels();
    format!("{{rgb,255:red,{red};green,{green};blue,{blue}}}")
}

fn tikz_font(size_pt: f64) -> String {
    format!("\\fontsize{{{:.1}}}{{{:.1}}}\\selectfont", size_pt, size_pt * 1.2)
}

fn escape_tex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            other => escaped.push(other),
        }
    }
    escaped
}
